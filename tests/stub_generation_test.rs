#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::fs;
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use test_case::test_case;

    use stub_gen::{StubProcessor, StubOptions, Multiplicity, IdentifierPattern, DirectiveStyle};
    use stub_gen::stub::processor::stub_writer::render_block;

    // Helper function to create a source file, including its parent directories
    fn create_source_file(root: &Path, relative: &str, content: &str) -> Result<()> {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, content)?;
        Ok(())
    }

    fn blocks(style: DirectiveStyle, names: &[&str]) -> String {
        names.iter().map(|name| render_block(style, name)).collect()
    }

    #[test]
    fn test_identifiers_written_in_file_order() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");

        create_source_file(&input, "actors.lua", r#"
---@class A
local A = {}

---@class B : A
local B = setmetatable({}, A)

---@class C
local C = {}
"#)?;

        let result = StubProcessor::with_defaults().run(&input, &output)?;

        assert_eq!(result.stats.total_files, 1);
        assert_eq!(result.stats.files_written, 1);
        assert_eq!(result.stats.total_stubs, 3);
        assert_eq!(result.outcomes[0].identifiers, vec!["A", "B", "C"]);
        assert_eq!(
            fs::read_to_string(output.join("actors.rst"))?,
            blocks(DirectiveStyle::Extended, &["A", "B", "C"])
        );
        Ok(())
    }

    #[test]
    fn test_default_output_format() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "actor.lua", "---@class Actor\n")?;

        StubProcessor::with_defaults().run(&input, &output)?;

        assert_eq!(fs::read_to_string(output.join("actor.rst"))?, "\
.. title:: Actor
.. lua:autoobject:: Actor
   :members:
   :special-members: __new
   :undoc-members:
   :inherited-members: __new
   :inherited-members-table:

");
        Ok(())
    }

    #[test]
    fn test_path_mirroring() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "a/b/Foo.lua", "-- @class Foo\n")?;

        let result = StubProcessor::with_defaults().run(&input, &output)?;

        assert_eq!(result.written_files(), vec![output.join("a").join("b").join("Foo.rst")]);
        assert!(!output.join("a").join("b").join("Foo.lua").exists());
        Ok(())
    }

    #[test]
    fn test_no_match_produces_no_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "util/strings.lua", "local M = {}\nreturn M\n")?;

        let result = StubProcessor::with_defaults().run(&input, &output)?;

        assert_eq!(result.stats.empty_files, 1);
        assert_eq!(result.stats.files_written, 0);
        assert!(!output.join("util").join("strings.rst").exists());
        assert!(output.join("util").is_dir());
        Ok(())
    }

    #[test]
    fn test_batch_rerun_is_idempotent() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "x/actor.lua", "---@class Actor\n---@class Pawn\n")?;

        let processor = StubProcessor::with_defaults();
        processor.run(&input, &output)?;
        let first = fs::read_to_string(output.join("x").join("actor.rst"))?;
        processor.run(&input, &output)?;
        let second = fs::read_to_string(output.join("x").join("actor.rst"))?;

        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_incremental_appends_each_match() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "actors.lua", "---@class A\n---@class B\n---@class C\n")?;

        let processor = StubProcessor::new(StubOptions {
            multiplicity: Multiplicity::Last,
            directive_style: DirectiveStyle::Compact,
            ..StubOptions::default()
        })?;

        processor.run(&input, &output)?;
        let expected = blocks(DirectiveStyle::Compact, &["A", "B", "C"]);
        assert_eq!(fs::read_to_string(output.join("actors.rst"))?, expected);

        // stale output accumulates in append mode
        processor.run(&input, &output)?;
        assert_eq!(fs::read_to_string(output.join("actors.rst"))?, expected.repeat(2));
        Ok(())
    }

    #[test_case(IdentifierPattern::NonWhitespace, "---@class ui.Button", Some("ui.Button") ; "broad accepts dot")]
    #[test_case(IdentifierPattern::NonWhitespace, "---@class my-widget", Some("my-widget") ; "broad accepts hyphen")]
    #[test_case(IdentifierPattern::Word, "---@class ui.Button", None ; "word rejects dot")]
    #[test_case(IdentifierPattern::Word, "---@class my-widget", None ; "word rejects hyphen")]
    #[test_case(IdentifierPattern::Word, "---@class Button_2", Some("Button_2") ; "word accepts underscore")]
    #[test_case(IdentifierPattern::Word, "---@class Foo.Bar @class Baz", None ; "word ignores later marker")]
    fn test_identifier_character_class(pattern: IdentifierPattern, line: &str, expected: Option<&str>) {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "widget.lua", line).unwrap();

        let processor = StubProcessor::new(StubOptions {
            identifier_pattern: pattern,
            ..StubOptions::default()
        }).unwrap();
        processor.run(&input, &output).unwrap();

        let stub = output.join("widget.rst");
        match expected {
            Some(name) => assert_eq!(fs::read_to_string(stub).unwrap(), blocks(DirectiveStyle::Extended, &[name])),
            None => assert!(!stub.exists()),
        }
    }

    #[test]
    fn test_extension_filter() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        create_source_file(&input, "actor.lua", "---@class Actor\n")?;
        create_source_file(&input, "NOTES", "@class Notes\n")?;
        create_source_file(&input, "view.moon", "-- @class View\n")?;

        let filtered_out = temp_dir.path().join("filtered");
        let result = StubProcessor::with_defaults().run(&input, &filtered_out)?;
        assert_eq!(result.written_files(), vec![filtered_out.join("actor.rst")]);

        let all_out = temp_dir.path().join("all");
        let processor = StubProcessor::new(StubOptions { all_files: true, ..StubOptions::default() })?;
        let result = processor.run(&input, &all_out)?;
        assert_eq!(result.written_files(), vec![
            all_out.join("NOTES.rst"),
            all_out.join("actor.rst"),
            all_out.join("view.rst"),
        ]);
        Ok(())
    }

    #[test]
    fn test_uppercase_extension_is_skipped() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "Foo.LUA", "---@class Foo\n")?;

        let result = StubProcessor::with_defaults().run(&input, &output)?;

        assert_eq!(result.stats.total_files, 0);
        assert!(result.written_files().is_empty());
        assert!(!output.join("Foo.rst").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_does_not_abort_run() -> Result<()> {
        use std::os::unix::fs::symlink;

        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        create_source_file(&input, "a/actor.lua", "---@class Actor\n")?;
        symlink(&input, input.join("a").join("loop"))?;

        let result = StubProcessor::with_defaults().run(&input, &output)?;

        assert_eq!(result.written_files(), vec![output.join("a").join("actor.rst")]);
        assert!(!output.join("a").join("loop").exists());
        Ok(())
    }

    #[test]
    fn test_parallel_run_matches_sequential() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        for i in 0..25 {
            let content = if i % 5 == 0 { String::new() } else { format!("---@class Class{i}\n") };
            create_source_file(&input, &format!("pkg{}/file{:02}.lua", i % 3, i), &content)?;
        }

        let sequential = StubProcessor::with_defaults().run(&input, temp_dir.path().join("seq"))?;
        let parallel = StubProcessor::new(StubOptions { jobs: Some(4), ..StubOptions::default() })?
            .run(&input, temp_dir.path().join("par"))?;

        assert_eq!(sequential.stats, parallel.stats);
        assert_eq!(sequential.stats.files_written, 20);
        let names = |r: &stub_gen::StubRunResult| -> Vec<Vec<String>> {
            r.outcomes.iter().map(|o| o.identifiers.clone()).collect()
        };
        assert_eq!(names(&sequential), names(&parallel));
        Ok(())
    }

    #[test]
    fn test_missing_input_directory_fails() -> Result<()> {
        let temp_dir = tempdir()?;
        let result = StubProcessor::with_defaults()
            .run(temp_dir.path().join("missing"), temp_dir.path().join("out"));
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_output_directory_created_twice() -> Result<()> {
        let temp_dir = tempdir()?;
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("nested").join("out");
        create_source_file(&input, "deep/er/mod.lua", "")?;

        let processor = StubProcessor::with_defaults();
        processor.run(&input, &output)?;
        processor.run(&input, &output)?;

        assert!(output.join("deep").join("er").is_dir());
        Ok(())
    }
}
