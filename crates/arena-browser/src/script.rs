//! Event scripts
//!
//! One input event per line. Blank lines and lines starting with `#` are
//! skipped. Arguments containing spaces go in double quotes:
//!
//! ```text
//! mouseenter "#toxic-tim"
//! move 42 17
//! type "input[name=name]" Rex
//! select select red
//! submit #application-form
//! key N alt shift
//! ```

use arena_engine::{select_option, EngineError, Key, Modifiers, Page};

/// One scripted input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load,
    Click(String),
    DblClick(String),
    MouseDown(String),
    MouseUp(String),
    MouseEnter(String),
    MouseLeave(String),
    Move { x: i32, y: i32 },
    Type { selector: String, text: String },
    Select { selector: String, value: String },
    Submit(String),
    Key { key: Key, modifiers: Modifiers },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Run {
        line: usize,
        #[source]
        source: EngineError,
    },
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = parse_line(trimmed).map_err(|message| ScriptError::Parse { line, message })?;
        steps.push(Step { line, command });
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Command, String> {
    let tokens = tokenize(line)?;
    let Some((name, args)) = tokens.split_first() else {
        return Err("empty command".to_string());
    };

    let command = match name.as_str() {
        "load" => {
            expect_args(name, args, 0)?;
            Command::Load
        }
        "click" => Command::Click(single(name, args)?),
        "dblclick" => Command::DblClick(single(name, args)?),
        "mousedown" => Command::MouseDown(single(name, args)?),
        "mouseup" => Command::MouseUp(single(name, args)?),
        "mouseenter" => Command::MouseEnter(single(name, args)?),
        "mouseleave" => Command::MouseLeave(single(name, args)?),
        "submit" => Command::Submit(single(name, args)?),
        "move" => {
            expect_args(name, args, 2)?;
            Command::Move {
                x: coordinate(&args[0])?,
                y: coordinate(&args[1])?,
            }
        }
        "type" => {
            let (selector, rest) = args
                .split_first()
                .ok_or_else(|| "type needs a selector".to_string())?;
            Command::Type {
                selector: selector.clone(),
                text: rest.join(" "),
            }
        }
        "select" => {
            expect_args(name, args, 2)?;
            Command::Select {
                selector: args[0].clone(),
                value: args[1].clone(),
            }
        }
        "key" => {
            let (key, flags) = args
                .split_first()
                .ok_or_else(|| "key needs a key value".to_string())?;
            let mut modifiers = Modifiers::default();
            for flag in flags {
                match flag.to_ascii_lowercase().as_str() {
                    "alt" => modifiers.alt = true,
                    "shift" => modifiers.shift = true,
                    "ctrl" => modifiers.ctrl = true,
                    "meta" => modifiers.meta = true,
                    other => return Err(format!("unknown modifier {other:?}")),
                }
            }
            Command::Key {
                key: Key::parse(key),
                modifiers,
            }
        }
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(command)
}

fn expect_args(name: &str, args: &[String], count: usize) -> Result<(), String> {
    if args.len() == count {
        Ok(())
    } else {
        Err(format!("{name} takes {count} argument(s), got {}", args.len()))
    }
}

fn single(name: &str, args: &[String]) -> Result<String, String> {
    expect_args(name, args, 1)?;
    Ok(args[0].clone())
}

fn coordinate(token: &str) -> Result<i32, String> {
    token
        .parse()
        .map_err(|_| format!("bad coordinate {token:?}"))
}

/// Whitespace split with double-quoted groups
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Replay `steps` against `page`, stopping at the first failure
pub fn run_script(page: &mut Page, steps: &[Step]) -> Result<usize, ScriptError> {
    for step in steps {
        run_step(page, &step.command).map_err(|source| ScriptError::Run {
            line: step.line,
            source,
        })?;
        tracing::debug!(line = step.line, command = ?step.command, "script step done");
    }
    Ok(steps.len())
}

fn run_step(page: &mut Page, command: &Command) -> Result<(), EngineError> {
    match command {
        Command::Load => {
            page.load();
        }
        Command::Click(selector) => {
            let node = page.query(selector)?;
            page.click(node);
        }
        Command::DblClick(selector) => {
            let node = page.query(selector)?;
            page.dblclick(node);
        }
        Command::MouseDown(selector) => {
            let node = page.query(selector)?;
            page.mouse_down(node);
        }
        Command::MouseUp(selector) => {
            let node = page.query(selector)?;
            page.mouse_up(node);
        }
        Command::MouseEnter(selector) => {
            let node = page.query(selector)?;
            page.mouse_enter(node);
        }
        Command::MouseLeave(selector) => {
            let node = page.query(selector)?;
            page.mouse_leave(node);
        }
        Command::Move { x, y } => {
            page.mouse_move(*x, *y);
        }
        Command::Type { selector, text } => {
            let node = page.query(selector)?;
            page.type_text(node, text)?;
        }
        Command::Select { selector, value } => {
            let node = page.query(selector)?;
            if !select_option(page.document_mut(), node, value)? {
                tracing::warn!(%selector, %value, "no such option");
            }
        }
        Command::Submit(selector) => {
            let node = page.query(selector)?;
            page.submit(node);
        }
        Command::Key { key, modifiers } => {
            page.key_down(key.clone(), *modifiers);
        }
    }
    page.run_pending();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_engine::{ArenaConfig, Host, RecordingNavigator, RecordingPlayer, reactions};

    #[test]
    fn test_parse_commands() {
        let steps = parse_script(
            r##"
            # warm up
            mouseenter "#toxic-tim"
            move 42 -17
            type "input[name=name]" Rex the Third
            key N alt shift
            "##,
        )
        .unwrap();

        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].line, 3);
        assert_eq!(steps[0].command, Command::MouseEnter("#toxic-tim".into()));
        assert_eq!(steps[1].command, Command::Move { x: 42, y: -17 });
        assert_eq!(
            steps[2].command,
            Command::Type {
                selector: "input[name=name]".into(),
                text: "Rex the Third".into()
            }
        );
        assert_eq!(
            steps[3].command,
            Command::Key {
                key: Key::Character('N'),
                modifiers: Modifiers::alt_shift()
            }
        );
    }

    #[test]
    fn test_quoted_selector_with_spaces() {
        let steps = parse_script(r##"click "#applicant-preview .doggo.blank""##).unwrap();
        assert_eq!(
            steps[0].command,
            Command::Click("#applicant-preview .doggo.blank".into())
        );
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_script("click p\n\nwiggle p").unwrap_err();
        assert!(matches!(err, ScriptError::Parse { line: 3, .. }));
        assert_eq!(err.to_string(), r#"line 3: unknown command "wiggle""#);

        assert!(parse_script("move 1").is_err());
        assert!(parse_script("key N hyper").is_err());
        assert!(parse_script("click \"p").is_err());
    }

    #[test]
    fn test_run_reports_selector_miss() {
        let config = ArenaConfig::default().with_seed(1);
        let mut page = Page::from_html("<p></p>", "about:blank", &config, Host::default());
        let steps = parse_script("click p\nclick #missing").unwrap();

        let err = run_script(&mut page, &steps).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Run {
                line: 2,
                source: EngineError::SelectorMiss(_)
            }
        ));
    }

    #[test]
    fn test_run_drives_reactions() {
        let config = ArenaConfig::default().with_seed(1);
        let nav = RecordingNavigator::new();
        let audio = RecordingPlayer::new();
        let html = r#"
            <div id="rex" class="doggo fighter"><h1>Rex</h1></div>
            <form action="/go"><input name="name"></form>
        "#;
        let mut page = Page::from_html(
            html,
            "http://localhost/",
            &config,
            Host::new(audio.clone(), nav.clone()),
        );
        reactions::install(&mut page, &config).unwrap();

        let steps = parse_script("mousedown #rex\ntype input ab\nsubmit form\nkey n alt shift").unwrap();
        assert_eq!(run_script(&mut page, &steps).unwrap(), 4);

        let rex = page.query("#rex").unwrap();
        assert!(page.document().class_list(rex).unwrap().contains("flipped"));
        assert_eq!(audio.count(), 3);
        assert_eq!(nav.requests(), vec!["http://nyan.cat/"]);
    }

    #[test]
    fn test_demo_script_replays() {
        let config = ArenaConfig::from_toml_str(include_str!("../demo/arena.toml")).unwrap();
        let nav = RecordingNavigator::new();
        let audio = RecordingPlayer::new();
        let mut page = Page::from_html(
            include_str!("../demo/arena.html"),
            "http://localhost/arena.html",
            &config,
            Host::new(audio.clone(), nav.clone()),
        );
        reactions::install(&mut page, &config).unwrap();
        page.load();

        let steps = parse_script(include_str!("../demo/events.txt")).unwrap();
        run_script(&mut page, &steps).unwrap();

        let tim = page.query("#toxic-tim").unwrap();
        let john = page.query("#inferno-john").unwrap();
        assert_eq!(page.document().class_list(tim).unwrap().value(), "doggo fighter");
        assert!(page.document().class_list(john).unwrap().contains("inverted"));

        let title = page.query("#applicant-preview h1").unwrap();
        assert_eq!(page.document().text_content(title), "Rex");
        assert_eq!(audio.played().last().map(String::as_str), Some("sounds/small-explosion.wav"));
        assert_eq!(nav.requests(), vec!["http://nyan.cat/"]);
    }
}
