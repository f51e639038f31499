use regex::Regex;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Write a bash completion script for `program`.
///
/// The script invokes `program trigger WORD...`, where the words are those of the command line up to and including the cursor.
/// The program should recognize `trigger` (ex: `--_complete`) as its first argument and respond with
/// [`App::write_completions`](crate::App::write_completions) at cursor `argv.len() - 1`.
/// Pick a trigger that can't be mistaken for a real argument.
///
/// ### Example
/// ```
/// # use argle_core as argle;
/// let mut script: Vec<u8> = Vec::default();
/// argle::bash_completions(&mut script, "program", "--_complete").unwrap();
///
/// let script = String::from_utf8(script).unwrap();
/// assert!(script.ends_with("complete -F _complete_argle_program 'program'\n"));
/// ```
pub fn bash_completions(writer: &mut impl Write, program: &str, trigger: &str) -> io::Result<()> {
    let function = format!("_complete_argle_{}", shell_id(program));
    let program = posix_quote(program);
    let trigger = posix_quote(trigger);

    writeln!(writer, "{function}() {{")?;
    writeln!(writer, "\tlocal cur=\"${{COMP_WORDS[$COMP_CWORD]}}\"")?;
    writeln!(writer, "\tlocal iprev=\"$(( COMP_CWORD - 1 ))\"")?;
    writeln!(writer, "\tCOMPREPLY=()")?;
    writeln!(writer, "\twhile IFS= read -r c; do")?;
    writeln!(writer, "\t\t[[ -n \"$c\" ]] && COMPREPLY+=(\"${{c%%$'\\t'*}}\")")?;
    writeln!(
        writer,
        "\tdone <<< \"$({program} {trigger} \"${{COMP_WORDS[@]:1:$iprev}}\" \"$cur\")\""
    )?;
    writeln!(writer, "}}")?;
    writeln!(writer, "complete -F {function} {program}")
}

/// Write a fish completion script for `program`.
///
/// The script invokes the program as described for [`bash_completions`], and displays each completion's description.
pub fn fish_completions(writer: &mut impl Write, program: &str, trigger: &str) -> io::Result<()> {
    let function = format!("__fish_complete_argle_{}", shell_id(program));
    let program = fish_quote(program);
    let trigger = fish_quote(trigger);

    writeln!(writer, "function {function}")?;
    writeln!(writer, "\tset -l tokens (commandline -cop)")?;
    writeln!(writer, "\tset -l cur (commandline -ct)")?;
    writeln!(writer, "\t{program} {trigger} $tokens[2..-1] \"$cur\"")?;
    writeln!(writer, "end")?;
    writeln!(writer, "complete -c {program} -f -k -a '({function})'")
}

// Single quotes, where each embedded quote closes the string, is escaped, then reopens it.
fn posix_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

fn fish_quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', r"\\").replace('\'', r"\'"))
}

// A shell identifier derived from the program name.
fn shell_id(program: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"[^a-zA-Z0-9_-]").expect("internal error - the shell id pattern must compile")
        })
        .replace_all(program, "_")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bash_script() {
        // Setup
        let mut buffer: Vec<u8> = Vec::default();

        // Execute
        bash_completions(&mut buffer, "a+a'", "_c").unwrap();

        // Verify
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            r#"_complete_argle_a_a_() {
	local cur="${COMP_WORDS[$COMP_CWORD]}"
	local iprev="$(( COMP_CWORD - 1 ))"
	COMPREPLY=()
	while IFS= read -r c; do
		[[ -n "$c" ]] && COMPREPLY+=("${c%%$'\t'*}")
	done <<< "$('a+a'\''' '_c' "${COMP_WORDS[@]:1:$iprev}" "$cur")"
}
complete -F _complete_argle_a_a_ 'a+a'\'''
"#
        );
    }

    #[test]
    fn fish_script() {
        // Setup
        let mut buffer: Vec<u8> = Vec::default();

        // Execute
        fish_completions(&mut buffer, "a+a'", "_c").unwrap();

        // Verify
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            r#"function __fish_complete_argle_a_a_
	set -l tokens (commandline -cop)
	set -l cur (commandline -ct)
	'a+a\'' '_c' $tokens[2..-1] "$cur"
end
complete -c 'a+a\'' -f -k -a '(__fish_complete_argle_a_a_)'
"#
        );
    }

    #[rstest]
    #[case("program", "program")]
    #[case("my-program_2", "my-program_2")]
    #[case("my.program", "my_program")]
    #[case("a b/c", "a_b_c")]
    fn program_shell_id(#[case] program: &str, #[case] expected: &str) {
        assert_eq!(shell_id(program), expected);
    }

    #[rstest]
    #[case("plain", "'plain'", "'plain'")]
    #[case("it's", r"'it'\''s'", r"'it\'s'")]
    #[case(r"back\slash", r"'back\slash'", r"'back\\slash'")]
    fn quoting(#[case] text: &str, #[case] posix: &str, #[case] fish: &str) {
        assert_eq!(posix_quote(text), posix);
        assert_eq!(fish_quote(text), fish);
    }
}
