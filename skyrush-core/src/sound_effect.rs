use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum SoundEffect {
    CountdownTick,
    CountdownGo,

    CheckpointCollect,
    BonusCollect,

    RaceComplete,
    RaceFailed,
    ObstacleHit,
    NewRecord,
}
