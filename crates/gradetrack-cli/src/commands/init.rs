//! The `gradetrack init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradetrack.toml").exists() {
        println!("gradetrack.toml already exists, skipping.");
    } else {
        std::fs::write("gradetrack.toml", SAMPLE_CONFIG)?;
        println!("Created gradetrack.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradetrack.toml to adjust subjects or the data directory");
    println!("  2. Run: gradetrack add --name \"Monthly 1\" --date 2025-10-10 --score math=120");
    println!("  3. Run: gradetrack stats");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradetrack configuration

data_dir = "./gradetrack-data"
seed_when_empty = true

# Remove the [[subjects]] entries to use the built-in nine-subject catalog.
[[subjects]]
id = "chinese"
name = "语文"
full_score = 150

[[subjects]]
id = "math"
name = "数学"
full_score = 150

[[subjects]]
id = "english"
name = "英语"
full_score = 150

[[subjects]]
id = "physics"
name = "物理"
full_score = 100

[[subjects]]
id = "chemistry"
name = "化学"
full_score = 100

[[subjects]]
id = "biology"
name = "生物"
full_score = 100

[[subjects]]
id = "history"
name = "历史"
full_score = 100

[[subjects]]
id = "geography"
name = "地理"
full_score = 100

[[subjects]]
id = "politics"
name = "政治"
full_score = 100
"#;
