use clap::Parser;

use super::*;

#[derive(Debug, Parser)]
struct TestCli {
    #[command(flatten)]
    args: TokenizeArgs,
}

fn output(argv: &[&str]) -> String {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    std::fs::write(&config, "{}").unwrap();

    let mut full = vec!["glint", "--config", config.to_str().unwrap()];
    full.extend_from_slice(argv);
    let args = TestCli::try_parse_from(full).unwrap().args;

    let mut out: Vec<u8> = Vec::new();
    execute(args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn lists_words_and_separators() {
    assert_eq!(
        output(&["helloWorld-again"]),
        "word \"hello\"\nword \"World\"\nsep  \"-\"\nword \"again\"\n"
    );
}

#[test]
fn query_mode_prints_uppercased_tokens() {
    assert_eq!(output(&["--query", "hel-Wor again"]), "HEL\nWOR\nAGAIN\n");
}

#[test]
fn flags_change_the_tokenizer() {
    assert_eq!(
        output(&["--no-split-by-case", "--split-symbols", "/", "a/bC d"]),
        "word \"a\"\nsep  \"/\"\nword \"bC d\"\n"
    );
}
