mod mx_answer;
mod mx_exchange;
mod record_class;
mod record_type;

pub use mx_answer::MxAnswer;
pub use mx_exchange::MxExchange;
pub use record_class::RecordClass;
pub use record_type::RecordType;
