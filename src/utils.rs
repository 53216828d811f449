use std::env;
use std::path::PathBuf;

/// Location of an external binary: the `env_var` override if set and non-empty,
/// otherwise the bare `name`, resolved through `PATH` when spawned.
pub(crate) fn get_third_party_binary(name: &str, env_var: &str) -> PathBuf {
    match env::var_os(env_var) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_override_falls_back_to_name() {
        let binary = get_third_party_binary("ffprobe", "CHAPTER_SPLIT_TEST_UNSET_VARIABLE");
        assert_eq!(binary, PathBuf::from("ffprobe"));
    }
}
