use crate::errors::{MoveDataError, MoveDataResult};
use schema::{Move, MoveData};

// Generated by build.rs from data/moves.ron.
include!(concat!(env!("OUT_DIR"), "/move_table.rs"));

/// Get move data for a specific move from the baked table.
pub fn get_move_data(move_: Move) -> MoveDataResult<MoveData> {
    let bytes = MOVE_TABLE
        .get(&(move_ as u16))
        .ok_or(MoveDataError::MoveNotFound(move_))?;
    postcard::from_bytes(bytes).map_err(|e| MoveDataError::MalformedData {
        move_,
        reason: e.to_string(),
    })
}

/// Get max PP for a specific move.
pub fn get_move_max_pp(move_: Move) -> MoveDataResult<u8> {
    get_move_data(move_).map(|data| data.max_pp)
}
