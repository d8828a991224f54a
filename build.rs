use std::env;

fn main() {
    // ABOGUS_VERSION wins over the package version so release builds can stamp their own
    let version = env::var("ABOGUS_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.1".to_string()));

    println!("cargo:rustc-env=ABOGUS_VERSION={}", version.trim());
    println!("cargo:rerun-if-env-changed=ABOGUS_VERSION");
}
