// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// Options for one parse session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Run the comment attachment pass. When off, every comment stays on
    /// `Ast::comments` in source order.
    pub attach_comments: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            attach_comments: true,
        }
    }
}
