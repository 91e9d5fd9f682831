//! Authentication infrastructure module
//!
//! Console sessions are HS256 bearer tokens whose subject is the account id.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
