#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use clap::Parser;
    use diffcalc::{Config, ScriptedSource, Session};

    fn session_for(config: &Config, lines: &[&str]) -> Session<ScriptedSource, Vec<u8>> {
        colored::control::set_override(false);
        Session::new(ScriptedSource::new(lines.iter().copied()), Vec::new())
            .with_defines(config.defines.clone())
            .verbose(config.verbose)
    }

    #[test]
    fn test_command_line_expression_with_defines() {
        let config = Config::parse_from([
            "diffcalc",
            "diff(a*x^2, x, p)",
            "-D",
            "a=3",
            "-D",
            "p=2",
        ]);
        let mut session = session_for(&config, &[]);

        let value = session.evaluate(config.expression.as_deref().unwrap()).unwrap();
        assert_abs_diff_eq!(value, 12.0, epsilon = 1e-3);

        let (source, _) = session.into_parts();
        assert!(source.prompts().is_empty());
    }

    #[test]
    fn test_prompted_session_output() {
        let config = Config::parse_from(["diffcalc"]);
        let mut session = session_for(&config, &["sqrt(b) + A", "1", "x", "16"]);
        assert!(session.run_once(None).unwrap());

        let (source, out) = session.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Expected a number. Try again.\nResult: 5.0\n"
        );
        assert_eq!(
            source.prompts(),
            &[
                "Enter an expression: ",
                "Enter a value for A: ",
                "Enter a value for b: ",
                "Enter a value for b: ",
            ]
        );
    }

    #[test]
    fn test_verbose_session_still_prints_result() {
        let config = Config::parse_from(["diffcalc", "--verbose", "pi * r^2", "-D", "r=1"]);
        let mut session = session_for(&config, &[]);
        assert!(session.run_once(config.expression.as_deref()).unwrap());

        let (_, out) = session.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), "Result: 3.141592653589793\n");
    }

    #[test]
    fn test_failed_evaluation_reports_false() {
        let config = Config::parse_from(["diffcalc", "diff(1, 2, 1)"]);
        let mut session = session_for(&config, &[]);
        assert!(!session.run_once(config.expression.as_deref()).unwrap());

        let (_, out) = session.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: The second argument of diff must be a variable name\n"
        );
    }
}
