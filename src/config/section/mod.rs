//! Configuration section definitions.
//!
//! Each module corresponds to a section in `cavy.toml`:
//!
//! | Module     | TOML Section   | Purpose                                  |
//! |------------|----------------|------------------------------------------|
//! | `project`  | `[project]`    | Project root, main app, enabled plugins  |
//! | `styles`   | `[styles]`     | Less compiler and independent mode       |
//! | `scripts`  | `[scripts]`    | Coffee compiler and join mode            |
//! | `minify`   | `[minify]`     | JS minifier                              |
//! | `serve`    | `[serve]`      | Local development server                 |
//! | `tools`    | `[tools]`      | Settings shared by all external tools    |

mod minify;
mod project;
mod scripts;
mod serve;
mod styles;
pub mod tools;

pub use minify::MinifyConfig;
pub use project::ProjectConfig;
pub use scripts::ScriptsConfig;
pub use serve::ServeConfig;
pub use styles::StylesConfig;
pub use tools::ToolsConfig;
