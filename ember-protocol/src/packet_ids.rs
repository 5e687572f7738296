/// Clientbound packets of the play state.
pub mod play {
    /// `set_entity_data`
    pub const C_SET_ENTITY_DATA: i32 = 0x5D;
}
