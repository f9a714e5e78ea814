fn main() {
    // Only the desktop binary needs the Tauri context; the library builds headless.
    if std::env::var_os("CARGO_FEATURE_APP").is_some() {
        tauri_build::build();
    }
}
