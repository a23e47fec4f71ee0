const UI_ENTRY_PATH: &str = "ui/app-window.slint";

fn main() {
    println!("cargo:rerun-if-changed=ui");

    slint_build::compile(UI_ENTRY_PATH).expect("Slint build failed");
}
