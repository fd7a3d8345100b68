// build.rs

fn main() {
    // Generate build info (VERGEN_BUILD_TIMESTAMP is shown on the landing page)
    vergen::EmitBuilder::builder()
        .build_timestamp()
        .emit()
        .expect("Unable to generate build info");
}
