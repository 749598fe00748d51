pub mod vmesh;
pub mod vrenderer;

pub use vmesh::VMesh;
