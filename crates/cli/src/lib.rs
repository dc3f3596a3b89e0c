// pastegrid CLI library: script parsing and output formatting for `pgrid`

pub mod input;
pub mod script;
pub mod state;
pub mod table;
