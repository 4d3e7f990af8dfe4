fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Stamped into `framekit::BUILD_DATE` and the long version string
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}
