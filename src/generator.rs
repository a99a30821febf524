use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context, Result};

use crate::group_id::GroupId;
use crate::plan::{Group, TestPlan};
use crate::progress::ProgressSink;

/// Drives the external test generator over every group of a plan.
///
/// The generator is a JVM tool; each group becomes one
/// `<runtime> -jar <jar> generate_python ...` invocation.
#[derive(Debug, Clone)]
pub struct TestGenerator {
    runtime: PathBuf,
    jar: PathBuf,
    test_root: PathBuf,
    python: PathBuf,
    output_dir: PathBuf,
    coverage_dir: PathBuf,
}

/// Fully resolved generator invocation for a single group
#[derive(Debug, Clone)]
pub struct GeneratorCmd {
    pub runtime: PathBuf,
    pub jar: PathBuf,
    pub source_file: PathBuf,
    pub python: PathBuf,
    pub output_file: PathBuf,
    pub coverage_file: PathBuf,
    pub search_paths: Vec<PathBuf>,
    pub timeout_secs: u64,
    pub classes: Option<Vec<String>>,
    pub methods: Option<Vec<String>>,
}

impl TestGenerator {
    pub fn new(
        runtime: &Path,
        jar: &Path,
        test_root: &Path,
        python: &Path,
        output_dir: &Path,
        coverage_dir: &Path,
    ) -> Self {
        Self {
            runtime: runtime.to_path_buf(),
            jar: jar.to_path_buf(),
            test_root: test_root.to_path_buf(),
            python: python.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            coverage_dir: coverage_dir.to_path_buf(),
        }
    }

    /// Clear out stale coverage reports and make sure both output
    /// directories exist
    ///
    /// # Errors
    /// * If a directory cannot be removed or created
    pub fn prepare_dirs(&self) -> Result<()> {
        if self.coverage_dir.exists() {
            fs::remove_dir_all(&self.coverage_dir).with_context(|| {
                format!(
                    "Failed to clear coverage directory: {}",
                    self.coverage_dir.display()
                )
            })?;
        }
        for dir in [&self.coverage_dir, &self.output_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Resolve the generator invocation for one group
    pub fn command_for(&self, id: &GroupId, group: &Group) -> GeneratorCmd {
        GeneratorCmd {
            runtime: self.runtime.clone(),
            jar: self.jar.clone(),
            source_file: id.source_file(&self.test_root),
            python: self.python.clone(),
            output_file: self.output_dir.join(id.tests_file_name()),
            coverage_file: self.coverage_dir.join(id.coverage_file_name()),
            search_paths: vec![self.test_root.clone()],
            timeout_secs: group.timeout,
            classes: group.classes.clone(),
            methods: group.methods.clone(),
        }
    }

    /// Generate tests for every group of the plan, in plan order.
    ///
    /// One generator process runs at a time and its stdout is forwarded to
    /// the sink. Exit codes are not inspected: a group whose generation
    /// fails leaves no report behind and scores 0% in the coverage check.
    ///
    /// # Errors
    /// * If a generator process cannot be spawned or supervised
    pub fn generate_all(&self, plan: &TestPlan, sink: &mut dyn ProgressSink) -> Result<()> {
        let parts_total = plan.parts.len();
        for (part_index, part) in plan.parts.iter().enumerate() {
            sink.part(part_index + 1, parts_total, &part.path);

            let files_total = part.files.len();
            for (file_index, file) in part.files.iter().enumerate() {
                sink.file(file_index + 1, files_total, &file.name);

                for (group_index, group) in file.groups.iter().enumerate() {
                    let id = GroupId::new(&part.path, &file.name, group_index);
                    let cmd = self.command_for(&id, group);
                    spawn_streaming(&cmd, sink)?;
                }
            }
        }
        Ok(())
    }
}

impl GeneratorCmd {
    /// Argument vector in the order the generator expects
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "-jar".to_string(),
            self.jar.display().to_string(),
            "generate_python".to_string(),
            self.source_file.display().to_string(),
            "-p".to_string(),
            self.python.display().to_string(),
            "-o".to_string(),
            self.output_file.display().to_string(),
            "-s".to_string(),
        ];
        args.extend(self.search_paths.iter().map(|p| p.display().to_string()));
        args.push("--timeout".to_string());
        args.push((self.timeout_secs * 1000).to_string());
        args.push("--install-requirements".to_string());
        args.push("--runtime-exception-behaviour".to_string());
        args.push("PASS".to_string());
        args.push(format!("--coverage={}", self.coverage_file.display()));
        if let Some(classes) = &self.classes {
            args.push("-c".to_string());
            args.push(classes.join(","));
        }
        if let Some(methods) = &self.methods {
            args.push("-m".to_string());
            args.push(methods.join(","));
        }
        args
    }

    /// Printable command line for the progress display
    pub fn render(&self) -> String {
        format!("{} {}", self.runtime.display(), self.args().join(" "))
    }

    fn build(&self) -> Command {
        let mut cmd = Command::new(&self.runtime);
        cmd.args(self.args());
        cmd
    }
}

/// Spawn one generator invocation and forward its stdout to the sink line
/// by line.
///
/// A dedicated reader thread drains the pipe and hands lines over a
/// channel; the thread is joined and the child reaped before this returns.
/// The child's exit status is not part of the contract.
///
/// # Errors
/// * If the process cannot be spawned or its stdout taken
/// * If the reader thread panics or the child cannot be reaped
pub fn spawn_streaming(cmd: &GeneratorCmd, sink: &mut dyn ProgressSink) -> Result<()> {
    sink.command(&cmd.render());

    let mut child = cmd
        .build()
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .with_context(|| format!("Failed to spawn generator: {}", cmd.runtime.display()))?;

    let stdout = child
        .stdout
        .take()
        .context("Generator stdout was not captured")?;

    let (sender, receiver) = mpsc::channel();
    let reader = thread::spawn(move || {
        for line in BufReader::new(stdout).lines() {
            match line {
                Ok(line) => {
                    if sender.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    for line in receiver {
        sink.output_line(&line);
    }

    reader
        .join()
        .map_err(|_| anyhow!("Generator output reader panicked"))?;
    let _ = child
        .wait()
        .context("Failed to reap generator process")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        parts: Vec<String>,
        files: Vec<String>,
        commands: Vec<String>,
        lines: Vec<String>,
    }

    impl ProgressSink for RecordingSink {
        fn part(&mut self, index: usize, total: usize, path: &str) {
            self.parts.push(format!("{index}/{total} {path}"));
        }

        fn file(&mut self, index: usize, total: usize, name: &str) {
            self.files.push(format!("{index}/{total} {name}"));
        }

        fn command(&mut self, cmd: &str) {
            self.commands.push(cmd.to_string());
        }

        fn output_line(&mut self, line: &str) {
            self.lines.push(line.to_string());
        }
    }

    fn generator(test_root: &str) -> TestGenerator {
        TestGenerator::new(
            Path::new("/usr/bin/java"),
            Path::new("generator.jar"),
            Path::new(test_root),
            Path::new("/usr/bin/python3"),
            Path::new("/out"),
            Path::new("/cov"),
        )
    }

    fn group(timeout: u64, classes: Option<Vec<String>>, methods: Option<Vec<String>>) -> Group {
        Group {
            timeout,
            classes,
            methods,
            coverage: 0,
        }
    }

    #[test]
    fn test_command_args_without_filters() {
        let id = GroupId::new("pkg", "mod", 0);
        let cmd = generator("/samples").command_for(&id, &group(30, None, None));
        assert_eq!(
            cmd.args().join(" "),
            "-jar generator.jar generate_python /samples/pkg/mod.py \
             -p /usr/bin/python3 -o /out/tests_pkg_mod.py -s /samples \
             --timeout 30000 --install-requirements \
             --runtime-exception-behaviour PASS \
             --coverage=/cov/coverage_pkg_mod.json"
        );
    }

    #[test]
    fn test_command_args_with_class_and_method_filters() {
        let id = GroupId::new("pkg", "mod", 1);
        let cmd = generator("/samples").command_for(
            &id,
            &group(
                5,
                Some(vec!["Alpha".to_string(), "Beta".to_string()]),
                Some(vec!["run".to_string()]),
            ),
        );

        let args = cmd.args().join(" ");
        assert!(args.contains("--timeout 5000"));
        assert!(args.ends_with("-c Alpha,Beta -m run"));
        assert!(args.contains("-o /out/tests_pkg_mod_1.py"));
        assert!(args.contains("--coverage=/cov/coverage_pkg_mod_1.json"));
    }

    #[test]
    fn test_render_starts_with_runtime() {
        let id = GroupId::new("pkg", "mod", 0);
        let cmd = generator("/samples").command_for(&id, &group(30, None, None));
        assert!(cmd.render().starts_with("/usr/bin/java -jar generator.jar"));
    }

    #[test]
    fn test_prepare_dirs_clears_stale_reports() {
        let temp_dir = tempfile::tempdir().unwrap();
        let coverage_dir = temp_dir.path().join("cov");
        let output_dir = temp_dir.path().join("out");
        fs::create_dir_all(coverage_dir.join("nested")).unwrap();
        fs::write(coverage_dir.join("coverage_stale.json"), "{}").unwrap();

        let generator = TestGenerator::new(
            Path::new("/usr/bin/java"),
            Path::new("generator.jar"),
            Path::new("/samples"),
            Path::new("/usr/bin/python3"),
            &output_dir,
            &coverage_dir,
        );
        generator.prepare_dirs().unwrap();

        assert!(coverage_dir.is_dir());
        assert!(output_dir.is_dir());
        assert_eq!(fs::read_dir(&coverage_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_spawn_streaming_forwards_stdout() {
        // `echo` simply prints its argument vector back on one line
        let id = GroupId::new("a", "f", 0);
        let generator = TestGenerator::new(
            Path::new("echo"),
            Path::new("generator.jar"),
            Path::new("/samples"),
            Path::new("/usr/bin/python3"),
            Path::new("/out"),
            Path::new("/cov"),
        );
        let cmd = generator.command_for(&id, &group(1, None, None));

        let mut sink = RecordingSink::default();
        spawn_streaming(&cmd, &mut sink).unwrap();

        assert_eq!(sink.commands.len(), 1);
        assert!(sink.commands[0].starts_with("echo -jar generator.jar"));
        assert_eq!(sink.lines.len(), 1);
        assert!(sink.lines[0].contains("generate_python /samples/a/f.py"));
    }

    #[test]
    fn test_spawn_streaming_fails_on_missing_binary() {
        let id = GroupId::new("a", "f", 0);
        let generator = TestGenerator::new(
            Path::new("/nonexistent/runtime"),
            Path::new("generator.jar"),
            Path::new("/samples"),
            Path::new("/usr/bin/python3"),
            Path::new("/out"),
            Path::new("/cov"),
        );
        let cmd = generator.command_for(&id, &group(1, None, None));

        let mut sink = RecordingSink::default();
        assert!(spawn_streaming(&cmd, &mut sink).is_err());
    }

    #[test]
    fn test_generate_all_walks_plan_in_order() {
        let plan: TestPlan = serde_json::from_str(
            r#"{
                "parts": [
                    {
                        "path": "a",
                        "files": [
                            {
                                "name": "f",
                                "groups": [
                                    {"timeout": 1, "classes": null, "methods": null},
                                    {"timeout": 1, "classes": null, "methods": null}
                                ]
                            }
                        ]
                    },
                    {
                        "path": "b",
                        "files": [
                            {
                                "name": "g",
                                "groups": [{"timeout": 1, "classes": null, "methods": null}]
                            }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        let generator = TestGenerator::new(
            Path::new("echo"),
            Path::new("generator.jar"),
            Path::new("/samples"),
            Path::new("/usr/bin/python3"),
            Path::new("/out"),
            Path::new("/cov"),
        );

        let mut sink = RecordingSink::default();
        generator.generate_all(&plan, &mut sink).unwrap();

        assert_eq!(sink.parts, vec!["1/2 a", "2/2 b"]);
        assert_eq!(sink.files, vec!["1/1 f", "1/1 g"]);
        assert_eq!(sink.commands.len(), 3);
        assert!(sink.commands[1].contains("tests_a_f_1.py"));
        assert!(sink.commands[2].contains("tests_b_g.py"));
    }
}
