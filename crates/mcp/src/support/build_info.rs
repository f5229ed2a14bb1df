#![forbid(unsafe_code)]

pub(crate) fn build_profile_label() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

pub(crate) fn build_git_sha() -> Option<&'static str> {
    option_env!("JOBMAP_GIT_SHA").and_then(|v| {
        let v = v.trim();
        if v.is_empty() { None } else { Some(v) }
    })
}

pub(crate) fn build_fingerprint() -> String {
    // Reported in serverInfo, --version, and every diagnostic record so a log
    // can always be tied to the exact binary that wrote it.
    //
    // Semver build metadata is `+<id>(.<id>)*` where `<id>` is `[0-9A-Za-z-]+`.
    // Keep it parseable and stable: `0.1.0+git.<sha>.<profile>`.
    let version = crate::SERVER_VERSION;
    let profile = build_profile_label();
    match build_git_sha() {
        Some(sha) => format!("{version}+git.{sha}.{profile}"),
        None => format!("{version}+{profile}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_embeds_version_and_profile() {
        let fingerprint = build_fingerprint();
        assert!(fingerprint.starts_with(crate::SERVER_VERSION));
        assert!(fingerprint.contains(build_profile_label()));
    }
}
