use super::{
    lenient_int,
    lenient_string,
    FieldMap,
};
use serde::Deserialize;

const DIRECT_PLAY: &str = "direct play";
const PLAYING: &str = "playing";

/// `response.data` of `get_activity`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityData {
    #[serde(deserialize_with = "lenient_int")]
    pub stream_count: i64,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "lenient_string")]
    pub video_decision: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub state: String,
}

impl Session {
    pub fn is_direct_play(&self) -> bool {
        self.video_decision == DIRECT_PLAY
    }

    pub fn is_playing(&self) -> bool {
        self.state == PLAYING
    }
}

/// Stream counts split by direct play and transcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivitySnapshot {
    /// As reported by the server, not recomputed from the sessions.
    pub stream_count: i64,
    pub total_playing: i64,
    pub transcode_count: i64,
    pub transcode_playing: i64,
    pub direct_count: i64,
    pub direct_playing: i64,
}

impl ActivitySnapshot {
    pub fn from_data(data: &ActivityData) -> Self {
        let mut snapshot = Self {
            stream_count: data.stream_count,
            ..Self::default()
        };

        for session in &data.sessions {
            if session.is_direct_play() {
                snapshot.direct_count += 1;
                if session.is_playing() {
                    snapshot.direct_playing += 1;
                }
            } else {
                snapshot.transcode_count += 1;
                if session.is_playing() {
                    snapshot.transcode_playing += 1;
                }
            }

            if session.is_playing() {
                snapshot.total_playing += 1;
            }
        }

        snapshot
    }

    /// `total_playing` is not exported.
    pub fn fields(&self) -> FieldMap {
        FieldMap::from([
            ("stream_count".to_string(), self.stream_count),
            ("transcode_count".to_string(), self.transcode_count),
            ("transcode_playing".to_string(), self.transcode_playing),
            ("direct_count".to_string(), self.direct_count),
            ("direct_playing".to_string(), self.direct_playing),
        ])
    }
}
