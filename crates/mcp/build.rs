#![forbid(unsafe_code)]

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Embeds a short git SHA into the binary so --version and diagnostic records
// can name the exact build. Builds from a source tarball simply omit it.
fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into()));
    let Some(sha) = head_sha(&manifest_dir) else {
        return;
    };
    let short = sha.chars().take(12).collect::<String>();
    if !short.is_empty() {
        println!("cargo:rustc-env=JOBMAP_GIT_SHA={short}");
    }
}

fn head_sha(start: &Path) -> Option<String> {
    let git_dir = locate_git_dir(start)?;

    let head_path = git_dir.join("HEAD");
    println!("cargo:rerun-if-changed={}", head_path.display());
    let head = fs::read_to_string(&head_path).ok()?;
    let head = head.trim();
    if head.is_empty() {
        return None;
    }

    match head.strip_prefix("ref:") {
        Some(ref_name) => ref_sha(&git_dir, ref_name.trim()),
        None => Some(head.to_string()),
    }
}

fn locate_git_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let dot_git = current.join(".git");
        if dot_git.is_dir() {
            return Some(dot_git);
        }
        // Worktrees keep a `.git` file pointing at the real directory.
        if dot_git.is_file() {
            let text = fs::read_to_string(&dot_git).ok()?;
            let line = text.lines().next().unwrap_or("").trim();
            return line
                .strip_prefix("gitdir:")
                .map(|path| current.join(path.trim()));
        }
        current = current.parent()?;
    }
}

fn ref_sha(git_dir: &Path, ref_name: &str) -> Option<String> {
    let loose = git_dir.join(ref_name);
    if loose.exists() {
        println!("cargo:rerun-if-changed={}", loose.display());
        if let Ok(text) = fs::read_to_string(&loose) {
            let sha = text.trim();
            if !sha.is_empty() {
                return Some(sha.to_string());
            }
        }
    }

    // After gc the ref may only exist in packed-refs.
    let packed = git_dir.join("packed-refs");
    if !packed.exists() {
        return None;
    }
    println!("cargo:rerun-if-changed={}", packed.display());
    let text = fs::read_to_string(&packed).ok()?;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('^') {
            continue;
        }
        if let Some((sha, name)) = line.split_once(' ')
            && name == ref_name
            && !sha.trim().is_empty()
        {
            return Some(sha.trim().to_string());
        }
    }
    None
}
