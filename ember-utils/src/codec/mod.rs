mod var_int;
mod var_long;

pub use var_int::VarInt;
pub use var_long::VarLong;
