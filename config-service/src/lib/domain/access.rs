pub mod gate;
pub mod policy;

pub use gate::GateResult;
pub use gate::RequestGate;
pub use policy::Access;
pub use policy::AccessPolicy;
