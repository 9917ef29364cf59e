pub(crate) mod date;
pub(crate) mod debug;
pub(crate) mod timezone;

pub(crate) use date::{ReportRange, parse_date, parse_range_arg};
pub(crate) use debug::{debug_enabled, debug_log, set_debug};
pub(crate) use timezone::Timezone;
