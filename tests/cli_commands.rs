use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const STATE: &str = r#"
[[worlds]]
name = "world"
dimension_type = "overworld"

[[worlds]]
name = "world_nether"
dimension_type = "nether"

[[worlds]]
name = "mining_nether"
dimension_type = "nether"

[[players]]
name = "Steve"
world = "world"
position = [0.5, 64.0, 0.5]

[catalogs]
block_type = [
    { id = "minecraft:stone", name = "Stone" },
    { id = "minecraft:stone_bricks", name = "Stone Bricks" },
]

[[solid_blocks]]
world = "world"
position = [3, 65, 0]

[source]
player = "Steve"
"#;

fn write_state(test: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "mdcommand_cli_{test}_{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, STATE).expect("write state file");
    path
}

fn run(state: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_mdcommand");
    Command::new(bin)
        .arg("--state")
        .arg(state)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn mdcommand")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn parse_prints_the_value() {
    let state = write_state("parse");
    let output = run(&state, &["parse", "yes_no", "Yes"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "true");

    let output = run(&state, &["parse", "vector", "#target"]);
    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.starts_with("DVec3("), "{printed}");
    assert!(printed.contains("    3.0,\n    65.0,\n    0.0,"), "{printed}");
}

#[test]
fn parse_failure_is_annotated() {
    let state = write_state("failure");
    let output = run(&state, &["parse", "color", "purpel"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown color 'purpel'. Did you mean 'purple'?"),
        "{stderr}"
    );
    assert!(stderr.contains("purpel\n^"), "{stderr}");
}

#[test]
fn location_falls_back_to_the_source_world() {
    let state = write_state("location");
    let output = run(&state, &["parse", "location", "~", "~1", "~"]);
    assert!(output.status.success());
    let printed = stdout(&output);
    assert!(printed.contains("name: \"world\""), "{printed}");
    assert!(printed.contains("    0.5,\n        65.0,\n        0.5,"), "{printed}");
}

#[test]
fn complete_lists_candidates() {
    let state = write_state("complete");
    let output = run(&state, &["complete", "world", "#"]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines, ["#first", "#me", "#nether", "#overworld", "#the_end"]);

    let output = run(&state, &["complete", "block", "stone_"]);
    assert_eq!(stdout(&output).trim(), "minecraft:stone_bricks");
}

#[test]
fn usage_and_list() {
    let state = write_state("usage");
    let output = run(&state, &["usage", "yes_no", "--key", "enabled"]);
    assert_eq!(stdout(&output).trim(), "<false|no|true|yes>");

    let output = run(&state, &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("mdcommand:location"));
}

#[test]
fn missing_state_file_uses_defaults() {
    let output = run(Path::new("does/not/exist.toml"), &["parse", "world", "#nether"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("world_nether"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Using defaults"), "{stderr}");
}
