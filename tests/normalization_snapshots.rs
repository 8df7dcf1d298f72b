//! Snapshot tests for the rendered forms of parsed command lines.

use wincmd::{render, CommandLineProcessor, OutputFormat};

fn render_with(raw: &str, format: OutputFormat) -> String {
    let processor = CommandLineProcessor::default();
    let doc = processor.parse(raw).expect("command line to parse");
    render(&doc, format).expect("render to succeed")
}

#[test]
fn snapshot_normalized_service_command() {
    let normalized = CommandLineProcessor::default()
        .normalize(r#""C:\Program Files (x86)\Vendor\svc.exe" -k netsvcs -p C:\Windows\Temp\x.log"#)
        .unwrap();
    insta::assert_snapshot!(normalized, @r#""?pf86\vendor\svc.exe" -k netsvcs -p ?win\temp\x.log"#);
}

#[test]
fn snapshot_normalized_cmd_exe_chain() {
    let normalized = CommandLineProcessor::default()
        .normalize(r"C:\Windows\System32\cmd.exe /c type C:\Users\Bob\notes.txt | findstr secret")
        .unwrap();
    insta::assert_snapshot!(normalized, @r#"?sys64\cmd.exe /c "type ?usr\notes.txt | findstr secret""#);
}

#[test]
fn snapshot_tree_output() {
    let tree = render_with(
        r#"C:\Windows\SysWOW64\rundll32.exe "C:\Users\Eve\AppData\Local\Temp\a.dll run" /s"#,
        OutputFormat::Tree,
    );
    insta::assert_snapshot!(tree, @r#"
    0: path C:\Windows\SysWOW64\rundll32.exe => ?sys32\rundll32.exe
    1: command value "C:\Users\Eve\AppData\Local\Temp\a.dll run"
      0: path C:\Users\Eve\AppData\Local\Temp\a.dll => ?usrtmp\a.dll
      1: text value run
    2: arg /s
    "#);
}

#[test]
fn snapshot_tokens_output() {
    let tokens = render_with(r#"reg add "HKLM\Software\X" /v Run /d "C:\x y.exe""#, OutputFormat::Tokens);
    insta::assert_snapshot!(tokens, @r#"
    reg
    add
    "HKLM\Software\X"
    /v
    Run
    /d
    "C:\x y.exe"
    "#);
}
