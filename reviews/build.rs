use common::yaml_include::load_yaml_with_includes;
use std::{error::Error, fs, io::Write, path::Path};

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("cargo:rerun-if-changed=config");
    println!("cargo:rerun-if-env-changed=REVIEW_GUARD_ENV");

    let out_dir = std::env::var("OUT_DIR")?;
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")?;
    let env = std::env::var("REVIEW_GUARD_ENV").unwrap_or_else(|_| "dev".to_string());
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());

    // OUT_DIR is <target>/<profile>/build/<pkg>/out
    let Some(target_root) = Path::new(&out_dir).ancestors().find(|p| p.ends_with("target")) else {
        println!("cargo:warning=Could not find target directory, skipping config assembly");
        return Ok(());
    };
    let target_dir = target_root.join(&profile);

    let total_config_dir = target_dir.join("config");
    let total_config_file_name = total_config_dir.join("total_config.yaml");
    let source_config = Path::new(&manifest_dir).join("config").join(format!("{}.yaml", env));

    println!("cargo:warning=Loading config env {:?} profile {:?}", env, profile);
    let config_yaml = load_yaml_with_includes(&source_config)?;

    let mut out_str = String::new();
    {
        let mut emitter = yaml_rust2::YamlEmitter::new(&mut out_str);
        emitter.dump(&config_yaml)?;
    }

    fs::create_dir_all(&total_config_dir)?;
    fs::File::create(&total_config_file_name)?.write_all(out_str.as_bytes())?;

    Ok(())
}
