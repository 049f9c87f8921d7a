#![allow(dead_code)]

use async_trait::async_trait;
use forge::errors::ForgeError;
use forge::process::{Invocation, ProcessOutput, ProcessRunner};
use std::path::Path;
use std::sync::Mutex;
use tokio::fs;

/// Records every invocation and answers with canned results.
pub struct FakeProcessRunner {
    pub captured: Mutex<Vec<(Invocation, Option<String>)>>,
    pub attached: Mutex<Vec<Invocation>>,
    output: ProcessOutput,
    attached_exit: Option<i32>,
    spawn_error: bool,
}

impl FakeProcessRunner {
    pub fn succeeding() -> Self {
        FakeProcessRunner {
            captured: Mutex::new(Vec::new()),
            attached: Mutex::new(Vec::new()),
            output: ProcessOutput {
                exit_code: Some(0),
                ..ProcessOutput::default()
            },
            attached_exit: Some(0),
            spawn_error: false,
        }
    }

    pub fn with_output(mut self, exit_code: i32, stderr: &str) -> Self {
        self.output = ProcessOutput {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        };
        self
    }

    pub fn with_attached_exit(mut self, exit_code: Option<i32>) -> Self {
        self.attached_exit = exit_code;
        self
    }

    pub fn with_spawn_error(mut self) -> Self {
        self.spawn_error = true;
        self
    }

    pub fn captured(&self) -> Vec<(Invocation, Option<String>)> {
        self.captured.lock().unwrap().clone()
    }

    pub fn attached(&self) -> Vec<Invocation> {
        self.attached.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for FakeProcessRunner {
    async fn run(&self, invocation: &Invocation, stdin: Option<&str>) -> Result<ProcessOutput, ForgeError> {
        self.captured
            .lock()
            .unwrap()
            .push((invocation.clone(), stdin.map(str::to_string)));
        if self.spawn_error {
            return Err(ForgeError::ProcessError(format!(
                "Failed to start {}: not found",
                invocation.program
            )));
        }
        Ok(self.output.clone())
    }

    async fn run_attached(&self, invocation: &Invocation) -> Result<Option<i32>, ForgeError> {
        self.attached.lock().unwrap().push(invocation.clone());
        Ok(self.attached_exit)
    }
}

pub const A_HPP: &str = "#pragma once\n#include <vector>\n#include <bits/stdc++.h>\n\nint add(int a, int b) { return a + b; }\n";

pub const B_HPP: &str = "#pragma once\n#include \"a.hpp\"\n\nclass Foo {\npublic:\n    int value() {\n        print(\"debug\", 1);\n        return 42;\n    }\n};\n";

pub const MAIN_CPP: &str = "#include \"include/a.hpp\"\n#include <bits/stdc++.h>\nusing namespace std;\n\nint main() {\n    Foo f;\n    pprint(f.value());\n    cout << add(1, 2) << endl;\n}\n";

/// Lays out `include/a.hpp`, `include/b.hpp` and `main.cpp` under `root`.
pub async fn write_project(root: &Path) {
    write(root, "include/a.hpp", A_HPP).await;
    write(root, "include/b.hpp", B_HPP).await;
    write(root, "main.cpp", MAIN_CPP).await;
}

pub async fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .unwrap_or_else(|e| panic!("Failed to create {:?}: {:?}", parent, e));
    }
    fs::write(&path, content)
        .await
        .unwrap_or_else(|e| panic!("Failed to write {:?}: {:?}", path, e));
}
