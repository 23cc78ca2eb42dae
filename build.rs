use std::{
    process::Command,
    time::{SystemTime, UNIX_EPOCH},
};

fn main() {
    // Re-stamp when the checked-out commit or the staged tree moves.
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    // `--version` reports the nearest tag; untagged or dirty trees still get a unique build id.
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output();

    let version = match output {
        Ok(o) if o.status.success() => {
            let git_output = String::from_utf8(o.stdout)
                .unwrap_or_default()
                .trim()
                .to_string();

            // "v1.0.0" -> "1.0.0"
            let version = git_output.strip_prefix('v').unwrap_or(&git_output);

            // Dirty tree or no describe output: suffix the build time
            if version.ends_with("-dirty") || version.is_empty() {
                format!("{}-{}", version, timestamp())
            } else {
                version.to_string()
            }
        }
        // Source tarball or no git on the build host
        _ => format!("0.0.0-unknown-{}", timestamp()),
    };

    // Read by `#[command(version = env!("CHARM_BUILDER_VERSION"))]` in main.rs
    println!("cargo:rustc-env=CHARM_BUILDER_VERSION={}", version);
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
