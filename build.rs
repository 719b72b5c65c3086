fn main() {
    let version = std::env::var("CARGO_APP_VERSION")
        .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=CARGO_APP_VERSION={version}");
    println!("cargo:rerun-if-env-changed=CARGO_APP_VERSION");
}
