//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod git;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use git::ReplayingGitRepo;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Take the output of the next `port::method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Decode a recorded `Result`.
///
/// `{"err": "message"}` becomes `Err(message)`; `{"ok": v}` or a bare `v`
/// is deserialized into `T`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replay_result_accepts_wrapped_and_bare_values() {
        let wrapped: Vec<String> = replay_result(&json!({"ok": ["a"]}), "t").unwrap();
        let bare: Vec<String> = replay_result(&json!(["a"]), "t").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn replay_result_surfaces_recorded_errors() {
        let err = replay_result::<String>(&json!({"err": "permission denied"}), "t").unwrap_err();
        assert_eq!(err.to_string(), "permission denied");
    }
}
