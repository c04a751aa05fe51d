//! The `keyscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("keyscore.toml").exists() {
        println!("keyscore.toml already exists, skipping.");
    } else {
        std::fs::write("keyscore.toml", SAMPLE_CONFIG)?;
        println!("Created keyscore.toml");
    }

    std::fs::create_dir_all("responses")?;
    let sample_path = std::path::Path::new("responses/sample.txt");
    if sample_path.exists() {
        println!("responses/sample.txt already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_RESPONSE)?;
        println!("Created responses/sample.txt");
    }

    println!("\nNext steps:");
    println!("  1. Edit keyscore.toml with your keyword groups");
    println!("  2. Run: keyscore validate --config keyscore.toml");
    println!("  3. Run: keyscore score --config keyscore.toml --input responses/sample.txt");
    println!("  4. Run: keyscore grade --config keyscore.toml --responses responses");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# keyscore configuration
#
# Each keyword group is worth `points`. A group scores when any of its
# alternatives is found in the response; the first matching alternative wins.

feedback = "You got @score of @total points"

[[keyword_groups]]
points = 5

[[keyword_groups.alternatives]]
alternative = "sun"

[[keyword_groups.alternatives]]
alternative = "star"

[[keyword_groups]]
points = 3

[[keyword_groups.alternatives]]
alternative = "moon"
[keyword_groups.alternatives.options]
case_sensitive = false
forgive_mistakes = true

[[keyword_groups]]
points = 2

[[keyword_groups.alternatives]]
alternative = "gravity"
[keyword_groups.alternatives.options]
forgive_mistakes = true
"#;

const SAMPLE_RESPONSE: &str = "The Sun and the Moon both pull on the oceans.\n\
Their gravitty causes the tides.\n";
