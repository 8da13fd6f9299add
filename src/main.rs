fn main() {
    if let Err(e) = bone_poser::core::Runner::run() {
        eprintln!("bone_poser failed: {}", e);
        std::process::exit(1);
    }
}
