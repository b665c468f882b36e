//! 認証トークン検証の実装
//!
//! - `jwt`: HS256 で署名された JWT（`jsonwebtoken`）

pub mod jwt;

pub use jwt::{Claims, ClaimsUser, JwtTokenValidator};
