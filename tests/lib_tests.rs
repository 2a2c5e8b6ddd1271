use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use wordtally::engine::{Cli, check_path, render_json, render_table, sort_counts, validate_paths};
use wordtally::pipeline::{PipelineTuning, fold_char, is_word_char, parse_line, tokenize};
use wordtally::utils::{WorkerThreadLimits, apply_file_to_opts, parse_wordtally_toml};
use wordtally::{LocalCounts, Opts, TallyOpts, WordCounts};

fn counts_of(pairs: &[(&str, u64)]) -> WordCounts {
    pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
}

// --- tokenize / parse_line ---

#[test]
fn test_tokenize_sample_line() {
    let tokens: Vec<String> = tokenize("I like dogs. Dogs are cute.").collect();
    assert_eq!(tokens, vec!["i", "like", "dogs", "dogs", "are", "cute"]);
}

#[test]
fn test_tokenize_drops_leading_and_trailing_delimiters() {
    let tokens: Vec<String> = tokenize("  --hello,   world!!  ").collect();
    assert_eq!(tokens, vec!["hello", "world"]);
}

#[test]
fn test_tokenize_punctuation_only_line() {
    assert_eq!(tokenize("...,,,???").count(), 0);
    assert_eq!(tokenize("").count(), 0);
}

#[test]
fn test_tokenize_keeps_underscore_and_digits() {
    let tokens: Vec<String> = tokenize("snake_case v2 x-ray").collect();
    assert_eq!(tokens, vec!["snake_case", "v2", "x", "ray"]);
}

#[test]
fn test_tokenize_unicode_letters_are_word_chars() {
    let tokens: Vec<String> = tokenize("Café ÜBER naïve").collect();
    assert_eq!(tokens, vec!["café", "über", "naïve"]);
    assert!(is_word_char('é'));
    assert!(!is_word_char('\''));
}

#[test]
fn test_tokenize_lowercases_one_char_for_one_char() {
    assert_eq!(fold_char('A'), 'a');
    assert_eq!(fold_char('Σ'), 'σ');
    // Lowercase of U+0130 is two chars; it is left unchanged.
    assert_eq!(fold_char('İ'), 'İ');
    let tokens: Vec<String> = tokenize("İSTANBUL").collect();
    assert_eq!(tokens, vec!["İstanbul"]);
    assert_eq!(tokens[0].chars().count(), "İSTANBUL".chars().count());
}

#[test]
fn test_parse_line_counts_case_folded() {
    let mut counts = LocalCounts::new();
    let n = parse_line("The the THE tHe", &mut counts);
    assert_eq!(n, 4);
    assert_eq!(counts, counts_of(&[("the", 4)]));
}

#[test]
fn test_parse_line_same_line_twice_gives_same_delta() {
    let line = "Are these things like the others?";
    let mut first = LocalCounts::new();
    let mut second = LocalCounts::new();
    parse_line(line, &mut first);
    parse_line(line, &mut second);
    assert_eq!(first, second);

    let mut both = LocalCounts::new();
    parse_line(line, &mut both);
    parse_line(line, &mut both);
    for (word, count) in &first {
        assert_eq!(both[word], count * 2);
    }
}

#[test]
fn test_parse_line_sample_text() {
    let mut counts = LocalCounts::new();
    parse_line("I like dogs. Dogs are cute.", &mut counts);
    parse_line("Are these things like the others?", &mut counts);
    assert_eq!(counts.len(), 9);
    assert_eq!(
        counts,
        counts_of(&[
            ("i", 1),
            ("like", 2),
            ("dogs", 2),
            ("are", 2),
            ("cute", 1),
            ("these", 1),
            ("things", 1),
            ("the", 1),
            ("others", 1),
        ])
    );
}

// --- sort_counts / render ---

#[test]
fn test_sort_counts_descending_with_ties_by_word() {
    let counts = counts_of(&[("b", 2), ("a", 2), ("c", 5), ("d", 1)]);
    let sorted = sort_counts(&counts);
    assert_eq!(
        sorted,
        vec![
            ("c".to_string(), 5),
            ("a".to_string(), 2),
            ("b".to_string(), 2),
            ("d".to_string(), 1),
        ]
    );
}

#[test]
fn test_sort_counts_keeps_every_word_sharing_a_count() {
    let counts: WordCounts = (0..100).map(|i| (format!("w{i}"), 1)).collect();
    assert_eq!(sort_counts(&counts).len(), 100);
}

#[test]
fn test_sort_counts_empty() {
    assert!(sort_counts(&HashMap::new()).is_empty());
}

#[test]
fn test_render_table_layout_and_top() {
    let sorted = sort_counts(&counts_of(&[("like", 2), ("i", 1), ("dogs", 2)]));
    let table = render_table(&sorted, None);
    assert!(table.contains("Merged Word Count:"));
    assert!(table.contains("dogs\t\t2\nlike\t\t2\ni\t\t1\n"));

    let top = render_table(&sorted, Some(1));
    assert!(top.contains("dogs\t\t2"));
    assert!(!top.contains("like"));
}

#[test]
fn test_render_json() {
    let sorted = sort_counts(&counts_of(&[("are", 2), ("cute", 1)]));
    let json = render_json(&sorted, None).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["word"], "are");
    assert_eq!(parsed[0]["count"], 2);
    assert_eq!(parsed[1]["word"], "cute");
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

// --- validate_paths ---

#[test]
fn test_validate_paths_empty_list() {
    let err = validate_paths(&[]).unwrap_err();
    assert_eq!(err.to_string(), "No file path provided.");
}

#[test]
fn test_validate_paths_ok_for_readable_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "alpha").unwrap();
    fs::write(&b, "").unwrap();
    assert!(validate_paths(&[a, b]).is_ok());
}

#[test]
fn test_validate_paths_aggregates_problems() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, "x").unwrap();
    let missing = dir.path().join("missing.txt");
    let not_a_file = dir.path().to_path_buf();

    let err = validate_paths(&[good, missing.clone(), not_a_file.clone()]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("There were one or more errors with the input:"));
    assert!(msg.contains(&format!("Invalid File Path: {}", missing.display())));
    assert!(msg.contains(&format!("Invalid File Path: {}", not_a_file.display())));
    assert_eq!(msg.lines().count(), 3);
}

#[test]
fn test_check_path_bad_name() {
    let p = PathBuf::from("bad File Path @#$#@%#$");
    assert!(check_path(&p).unwrap().starts_with("Invalid File Path"));
}

// --- tuning ---

#[test]
fn test_worker_limits_resolve() {
    let limits = WorkerThreadLimits {
        all_threads: 6,
        ..WorkerThreadLimits::default()
    };
    assert_eq!(limits.resolve(None), 6);
    assert_eq!(limits.resolve(Some(3)), 3);
    assert_eq!(limits.resolve(Some(0)), 1);
    let none = WorkerThreadLimits::default();
    assert_eq!(none.resolve(None), 1);
}

#[test]
fn test_pipeline_tuning_channel_cap() {
    let opts = Opts {
        num_workers: Some(3),
        ..Opts::default()
    };
    let tuning = PipelineTuning::from_opts(&opts);
    assert_eq!(tuning.num_workers, 3);
    assert_eq!(tuning.channel_cap, Some(12));

    let unbounded = PipelineTuning::from_opts(&Opts {
        num_workers: Some(2),
        channel_cap: Some(0),
        ..Opts::default()
    });
    assert_eq!(unbounded.channel_cap, None);

    let fixed = PipelineTuning::from_opts(&Opts {
        num_workers: Some(2),
        channel_cap: Some(7),
        ..Opts::default()
    });
    assert_eq!(fixed.channel_cap, Some(7));
}

#[test]
fn test_pipeline_tuning_clamps_zero_await_interval() {
    let opts = Opts::from(&TallyOpts {
        num_workers: Some(1),
        await_interval: Duration::ZERO,
        ..TallyOpts::default()
    });
    let tuning = PipelineTuning::from_opts(&opts);
    assert!(tuning.await_interval >= Duration::from_millis(1));

    let kept = PipelineTuning::from_opts(&Opts {
        await_interval: Duration::from_secs(3),
        ..Opts::default()
    });
    assert_eq!(kept.await_interval, Duration::from_secs(3));
}

#[test]
fn test_tally_opts_into_opts() {
    let lib = TallyOpts {
        num_workers: Some(5),
        channel_cap: Some(0),
        await_interval: Duration::from_millis(250),
        strict: true,
    };
    let opts = Opts::from(&lib);
    assert_eq!(opts.num_workers, Some(5));
    assert_eq!(opts.channel_cap, Some(0));
    assert_eq!(opts.await_interval, Duration::from_millis(250));
    assert!(opts.strict);
    assert!(!opts.json);
    assert_eq!(opts.top, None);
}

// --- settings file + CLI precedence ---

#[test]
fn test_settings_file_applies_present_fields_only() {
    let file = parse_wordtally_toml(
        r#"
[settings]
workers = 3
await_interval_secs = 2
top = 10
json = true
"#,
    )
    .unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.num_workers, Some(3));
    assert_eq!(opts.await_interval, Duration::from_secs(2));
    assert_eq!(opts.top, Some(10));
    assert!(opts.json);
    assert!(!opts.strict);
    assert_eq!(opts.channel_cap, None);
}

#[test]
fn test_settings_file_empty_and_malformed() {
    let empty = parse_wordtally_toml("").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&empty, &mut opts);
    assert_eq!(opts.num_workers, None);

    assert!(parse_wordtally_toml("[settings]\nworkers = \"many\"").is_err());
}

#[test]
fn test_cli_overrides_settings_file() {
    let file = parse_wordtally_toml("[settings]\nworkers = 3\nstrict = true\n").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);

    let cli = Cli::try_parse_from(["wordtally", "-w", "8", "--strict=false", "--json", "a.txt", "b.txt"])
        .unwrap();
    cli.apply_to_opts(&mut opts);
    assert_eq!(opts.num_workers, Some(8));
    assert!(!opts.strict);
    assert!(opts.json);
    assert_eq!(cli.files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
}

#[test]
fn test_cli_no_files_parses_for_validator() {
    let cli = Cli::try_parse_from(["wordtally"]).unwrap();
    assert!(cli.files.is_empty());
    assert!(validate_paths(&cli.files).is_err());
}

#[test]
fn test_cli_rejects_zero_await_interval() {
    assert!(Cli::try_parse_from(["wordtally", "--await-interval", "0", "a.txt"]).is_err());
}
