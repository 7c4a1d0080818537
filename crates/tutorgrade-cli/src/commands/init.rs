//! The `tutorgrade init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("tutorgrade.toml").exists() {
        println!("tutorgrade.toml already exists, skipping.");
    } else {
        std::fs::write("tutorgrade.toml", SAMPLE_CONFIG)?;
        println!("Created tutorgrade.toml");
    }

    std::fs::create_dir_all("exercise-sets")?;
    let example_path = std::path::Path::new("exercise-sets/example.toml");
    if example_path.exists() {
        println!("exercise-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_EXERCISE_SET)?;
        println!("Created exercise-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: tutorgrade validate --exercise-set exercise-sets/example.toml");
    println!(
        "  2. Run: tutorgrade grade --exercise-set exercise-sets/example.toml --exercise greeting --answer '\"b\"' --record"
    );
    println!("  3. Run: tutorgrade stats");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# tutorgrade configuration

submissions_path = "./tutorgrade-submissions.json"
default_student = "anonymous"
# ${VAR} references are read from the environment
# submissions_path = "${HOME}/tutorgrade/submissions.json"
default_reviewer = "teacher"
output_format = "text"
"#;

const EXAMPLE_EXERCISE_SET: &str = r#"[exercise_set]
id = "example"
name = "Example Exercise Set"
description = "A short Spanish lesson to get started"
language = "es"

[[exercises]]
id = "greeting"
type = "multiple-choice"
title = "Greetings"
points = 1
question = "How do you say 'good morning'?"
options = [
    { id = "a", text = "Buenas noches" },
    { id = "b", text = "Buenos días", isCorrect = true },
    { id = "c", text = "Hasta luego" },
]

[[exercises]]
id = "ser"
type = "fill-in-blanks"
title = "The verb ser"
points = 2
text = "Yo _____ estudiante y ella _____ profesora."
blanks = [
    { id = "b1", answer = "soy", position = 0 },
    { id = "b2", answer = "es", position = 1, hint = "third person" },
]

[[exercises]]
id = "describe"
type = "free-writing"
title = "About me"
points = 10
prompt = "Describe yourself in Spanish."
minWords = 20
maxWords = 80
requiredElements = ["me llamo"]
"#;
