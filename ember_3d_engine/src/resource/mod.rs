/// Resource module - GPU-backed assets shared between entities

pub mod mesh;
pub mod obj;
pub mod shader;
pub mod material;

pub use mesh::{Mesh, Vertex};
pub use obj::{ObjData, load_obj, parse_obj};
pub use shader::{SimpleShader, ShaderVariable};
pub use material::{Material, MaterialDesc, ParamValue};
