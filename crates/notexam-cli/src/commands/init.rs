//! The `notexam init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create notexam.toml
    if std::path::Path::new("notexam.toml").exists() {
        println!("notexam.toml already exists, skipping.");
    } else {
        std::fs::write("notexam.toml", SAMPLE_CONFIG)?;
        println!("Created notexam.toml");
    }

    // Create sample exam note
    std::fs::create_dir_all("exams")?;
    let sample_path = std::path::Path::new("exams/sample-exam.md");
    if sample_path.exists() {
        println!("exams/sample-exam.md already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_EXAM)?;
        println!("Created exams/sample-exam.md");
    }

    println!("\nNext steps:");
    println!("  1. Run: notexam validate --notes exams/sample-exam.md");
    println!("  2. Run: notexam run --notes exams/sample-exam.md");
    println!("  3. Drop your own notes into exams/ and go again");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# notexam configuration

output_dir = "./notexam-results"
shuffle_questions = false
shuffle_options = false
"#;

const SAMPLE_EXAM: &str = r#"Practice exam distilled from the week 1 notes.

Q1. What is 2+2?
A. 3
B. 4
C. 5
Answer: B

Q2. Which of these are prime numbers?
A. 2
B. 4
C. 5
D. 9
Answer: A, C

Q3. Name a primary color.
Answer: Red
"#;
