//! Fixed classification rule tables.
//!
//! All tables hold lowercase labels and are matched against lowercased
//! report entries. They are process-wide constants, initialized once on
//! first use.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Labels with no useful language signal: plain text, markup, config and
/// log formats, editor artifacts. Dropped entirely.
pub static DISCARDED_LABELS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "other",
        "others",
        "binary",
        "textmate",
        "text",
        "plaintext",
        "json",
        "yaml",
        "yml",
        "xml",
        "toml",
        "ini",
        "conf",
        "config",
        "markdown",
        "md",
        "txt",
        "log",
        "csv",
        "tsv",
        "git commit message",
        "git config",
        "git rebase",
        "tex",
        "latex",
        "bibtex",
        "xaml",
        "gitignore",
        "gitignore file",
        "batchfile",
        "batch",
        "class",
        "git",
        "pickle",
        "self",
        "sourcemap",
        "ssh config",
        "ssh_config",
        "diff",
        "prolog",
        "spi",
        "postscript",
    ])
});

/// Native build tooling. Folded into the C++ bucket.
pub static BUILD_TOOLING_LABELS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "cmake",
        "cmakelist",
        "cmakelists",
        "makefile",
        "make",
        "ninja",
        "microsoft visual studio solution",
        "msvs",
    ])
});

/// Notebook formats and Python stubs. Folded into the Python bucket.
pub static NOTEBOOK_LABELS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "jupyter",
        "jupyter notebook",
        "ipynb",
        "pythonstub",
        "python stub",
    ])
});

/// Java-adjacent auxiliary files. Folded into the Java bucket.
pub static JAVA_AUX_LABELS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "java properties",
        "properties",
        "mixin_json_configuration",
        "mixin json configuration",
        "idea_module",
        "idea module",
        "access transformers",
    ])
});

/// Build-orchestrator labels whose time is split across the Gradle target
/// languages in proportion to their own observed durations.
pub static GRADLE_LABELS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["gradle", "groovy gradle"]));

/// Languages that receive redistributed orchestrator time, in display order.
pub const GRADLE_TARGETS: [&str; 3] = ["java", "kotlin", "groovy"];

/// Frontend stack. Collapsed into one [`FRONTEND_GROUP`] bucket.
pub static FRONTEND_LABELS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "javascript",
        "typescript",
        "html",
        "css",
        "scss",
        "sass",
        "less",
        "jsx",
        "tsx",
        "vue",
        "vue.js",
        "svelte",
        "tsconfig",
        "tsconfig.json",
    ])
});

/// Shells, scripting and container files. Collapsed into one
/// [`SHELL_GROUP`] bucket.
pub static SHELL_LABELS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "bash",
        "shell",
        "shellscript",
        "shell script",
        "sh",
        "zsh",
        "nix",
        "actionscript",
        "powershell",
        "pwsh",
        "docker",
        "dockerfile",
    ])
});

/// Shader languages. Collapsed into one [`SHADER_GROUP`] bucket.
pub static SHADER_LABELS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["glsl", "hlsl", "shaderlab"]));

/// Spelling variants of Objective-C, merged case-insensitively.
pub static OBJC_LABELS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["objective-c", "objectivec", "objective c", "objc"]));

/// Joint C/C++ labels, merged into the C bucket. The standalone "C++" label
/// is deliberately not in this set; it keeps its own bucket.
pub static C_JOINT_LABELS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["c/c++", "c/c", "c++/c"]));

/// Display names for the synthetic aggregate buckets. No raw label collides
/// with these, so their buckets are always freshly created.
pub const FRONTEND_GROUP: &str = "Frontend Langs";
pub const SHELL_GROUP: &str = "Shell Langs";
pub const SHADER_GROUP: &str = "Shader Langs";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_disjoint() {
        let tables: [&HashSet<&str>; 9] = [
            &DISCARDED_LABELS,
            &BUILD_TOOLING_LABELS,
            &NOTEBOOK_LABELS,
            &JAVA_AUX_LABELS,
            &GRADLE_LABELS,
            &FRONTEND_LABELS,
            &SHELL_LABELS,
            &SHADER_LABELS,
            &OBJC_LABELS,
        ];

        for (i, a) in tables.iter().enumerate() {
            for b in tables.iter().skip(i + 1) {
                let overlap: Vec<_> = a.intersection(b).copied().collect();
                assert!(overlap.is_empty(), "tables share labels: {overlap:?}");
            }
        }
    }

    #[test]
    fn standalone_cpp_is_not_a_joint_label() {
        assert!(!C_JOINT_LABELS.contains("c++"));
        assert!(!C_JOINT_LABELS.contains("c"));
    }

    #[test]
    fn gradle_targets_are_not_orchestrator_labels() {
        for target in GRADLE_TARGETS {
            assert!(!GRADLE_LABELS.contains(target));
        }
    }
}
