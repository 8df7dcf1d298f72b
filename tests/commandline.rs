//! End-to-end behavior of the library on realistic command lines.

use rstest::rstest;
use wincmd::{
    parse_and_classify, tokenize, Architecture, CommandLineProcessor, LexError, PathNormalizer,
};

const PROGRAM: &str =
    r#""C:\Program Files\MyProgram.exe" /d C:\Users\Alice\file.txt --file C:\test.py"#;
const SUB_COMMAND: &str = r#""C:\Program Files\MyProgram.exe" /d "C:\Users\Alice\appdata\local\temp\test.exe --file C:\test.py""#;
const WITH_VALUES: &str = r#""C:\Program Files\MyProgram.exe" /d "C:\Users\Alice\file.txt --file C:\test.py" -f C:\Users\Bob\file"#;

fn x64() -> &'static PathNormalizer {
    PathNormalizer::shared(Architecture::X86_64)
}

#[test]
fn processor_answers_queries_on_a_flat_command_line() {
    let processor = CommandLineProcessor::new(Architecture::X86_64);

    assert_eq!(processor.args(PROGRAM, false).unwrap(), vec!["/d", "--file"]);
    assert_eq!(processor.paths(PROGRAM, false).unwrap().len(), 3);
    assert_eq!(
        processor.normalized_paths(PROGRAM, false).unwrap(),
        vec![r#""?pf64\myprogram.exe""#, r"?usr\file.txt", r"?c\test.py"]
    );
    assert_eq!(
        processor.normalize(PROGRAM).unwrap(),
        r#""?pf64\myprogram.exe" /d ?usr\file.txt --file ?c\test.py"#
    );
}

#[test]
fn sub_commands_are_normalized_in_place() {
    let processor = CommandLineProcessor::default();
    assert_eq!(
        processor.normalize(SUB_COMMAND).unwrap(),
        r#""?pf64\myprogram.exe" /d "?usrtmp\test.exe --file ?c\test.py""#
    );
}

#[rstest(
    include_nested,
    expected,
    case(true, vec!["/d", "--file"]),
    case(false, vec!["/d"])
)]
fn sub_command_args(include_nested: bool, expected: Vec<&str>) {
    let processor = CommandLineProcessor::default();
    assert_eq!(processor.args(SUB_COMMAND, include_nested).unwrap(), expected);
}

#[test]
fn sub_command_paths_with_nesting() {
    let processor = CommandLineProcessor::default();
    assert_eq!(
        processor.paths(SUB_COMMAND, true).unwrap(),
        vec![
            r#""C:\Program Files\MyProgram.exe""#,
            r"C:\Users\Alice\appdata\local\temp\test.exe",
            r"C:\test.py",
        ]
    );
    assert_eq!(
        processor.normalized_paths(SUB_COMMAND, true).unwrap(),
        vec![r#""?pf64\myprogram.exe""#, r"?usrtmp\test.exe", r"?c\test.py"]
    );
}

#[test]
fn cmd_exe_rest_becomes_a_sub_command() {
    let processor = CommandLineProcessor::default();
    assert_eq!(
        processor
            .normalize(r"C:\Windows\System32\cmd.exe /c C:\Users\Alice\appdata\local\temp\file.txt --file C:\test.py")
            .unwrap(),
        r#"?sys64\cmd.exe /c "?usrtmp\file.txt --file ?c\test.py""#
    );
}

#[test]
fn cmd_exe_with_short_flag_is_split_in_three() {
    let doc = parse_and_classify(
        r"C:\Windows\System32\cmd.exe /c C:\Users\Alice\file.txt --f C:\test.py",
        x64(),
    )
    .unwrap();
    assert_eq!(doc.len(), 3);
    assert!(doc[0].is_path());
    assert!(doc[1].is_arg());
    assert!(doc[2].is_command());
    let sub = doc[2].sub_command().unwrap();
    assert_eq!(sub.args(), vec![(1, "--f")]);
    assert_eq!(
        sub.paths(),
        vec![
            (0, r"C:\Users\Alice\file.txt", r"?usr\file.txt"),
            (2, r"C:\test.py", r"?c\test.py"),
        ]
    );
}

#[rstest(flag => ["/c", "/k", "-c", "-k"])]
fn cmd_exe_flags_force_a_quoted_rest(flag: &str) {
    let raw = format!(r"C:\Windows\System32\cmd.exe {} dir C:\x", flag);
    assert_eq!(
        tokenize(&raw).unwrap(),
        vec![r"C:\Windows\System32\cmd.exe", flag, r#""dir C:\x""#]
    );
    assert_eq!(
        CommandLineProcessor::default().normalize(&raw).unwrap(),
        format!(r#"?sys64\cmd.exe {} "dir ?c\x""#, flag)
    );
}

#[rstest(flag => ["-c", "-k"])]
fn upper_case_extension_accepts_dash_flags(flag: &str) {
    let raw = format!("cmd.EXE {} echo hi", flag);
    assert_eq!(
        tokenize(&raw).unwrap(),
        vec!["cmd.EXE", flag, r#""echo hi""#]
    );
}

#[test]
fn cmd_exe_with_empty_rest_yields_empty_sub_command() {
    assert_eq!(tokenize("cmd.exe /c ").unwrap(), vec!["cmd.exe", "/c", r#""""#]);

    let doc = parse_and_classify("cmd.exe /c ", x64()).unwrap();
    assert!(doc[2].is_command());
    assert!(doc[2].sub_command().unwrap().is_empty());
    assert_eq!(doc.normalize(), r#"cmd.exe /c """#);
}

#[rstest(
    raw,
    expected,
    case(r"\??\C:\test \?\C:\test  C:\test", vec![r"?c\test", r"?c\test", r"?c\test"]),
    case(r"\?\Volume{26a21bda-a627-11d7-9931-806e6f6e6963}", vec![r"\?\volume{guid}"]),
    case(r"C:\Windows\test", vec![r"?win\test"]),
    case(r#""C:\Program Files\test""#, vec![r#""?pf64\test""#]),
    case(r#""C:\Program Files (x86)\test""#, vec![r#""?pf86\test""#]),
    case(r"C:\Windows\Syswow64", vec!["?sys32"]),
    case(r"C:\Windows\System32", vec!["?sys64"])
)]
fn stems_on_x86_64(raw: &str, expected: Vec<&str>) {
    let doc = parse_and_classify(raw, x64()).unwrap();
    assert_eq!(doc.stems(), expected);
}

#[rstest(
    raw,
    expected,
    case(r"C:\Windows\System32\calc.exe", r"?sys32\calc.exe"),
    case(r#""C:\Program Files\test""#, r#""?pf86\test""#)
)]
fn stems_on_x86(raw: &str, expected: &str) {
    let doc = parse_and_classify(raw, PathNormalizer::shared(Architecture::X86)).unwrap();
    assert_eq!(doc.stems(), vec![expected]);
}

#[test]
fn values_carry_normalized_stems() {
    let doc = parse_and_classify(WITH_VALUES, x64()).unwrap();

    assert!(doc[2].is_value());
    assert!(doc[4].is_value());
    assert!(!doc[2].is_path());
    assert!(doc[2].is_command());

    let values = doc.values();
    assert_eq!(values.len(), 2);
    assert_eq!(values[1], (4, r"C:\Users\Bob\file", r"?usr\file"));
}

#[test]
fn quoted_program_path_is_not_a_command() {
    let doc = parse_and_classify(WITH_VALUES, x64()).unwrap();
    assert!(doc[0].is_path());
    assert!(!doc[0].is_command());
    assert!(!doc[0].is_value());
}

#[test]
fn normalizing_twice_is_stable() {
    let processor = CommandLineProcessor::default();
    let once = processor.normalize(SUB_COMMAND).unwrap();
    assert_eq!(processor.normalize(&once).unwrap(), once);
}

#[rstest(raw => [r#"run "" x"#, r#"run abc" x"#, r#"x ""#])]
fn malformed_input_is_rejected(raw: &str) {
    let err = CommandLineProcessor::default().normalize(raw).unwrap_err();
    assert!(matches!(err, LexError::MalformedInput { .. }));
}

#[test]
fn deep_nesting_is_capped() {
    let processor = CommandLineProcessor::default().with_max_depth(2);
    assert!(processor.normalize(r#"a "b "c "d e""""#).is_err());
    assert!(processor.normalize(r#"a "b "c d"""#).is_ok());
}
