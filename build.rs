// build.rs

fn main() {
    // --- Link against X11 ---
    // Try pkg-config first, which is the standard way to find library
    // linking information on Unix-like systems. If pkg-config fails
    // (e.g., not installed, or the .pc file is missing), fall back to
    // manually specifying common linker flags.

    match pkg_config::probe_library("x11") {
        Ok(_) => {
            eprintln!("pkg-config found X11. Linking configured automatically.");
        }
        Err(_) => {
            // --- Manual Linking Fallback ---
            // Assumes the library is in a standard path like /usr/lib.
            eprintln!("pkg-config failed for 'x11'. Falling back to manual linking.");
            println!("cargo:rustc-link-lib=X11");
            println!("cargo:rustc-link-search=/usr/lib");
        }
    }
}
