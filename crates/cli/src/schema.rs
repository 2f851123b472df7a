use scopebind_core::registry::Manifest;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(Manifest);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
