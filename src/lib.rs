#![warn(
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::copy_iterator,
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::enum_glob_use,
    clippy::expl_impl_clone_on_copy,
    clippy::explicit_into_iter_loop,
    clippy::explicit_iter_loop,
    clippy::filter_map_next,
    clippy::if_not_else,
    clippy::inline_always,
    clippy::items_after_statements,
    clippy::large_digit_groups,
    clippy::large_stack_arrays,
    clippy::map_flatten,
    clippy::match_same_arms,
    clippy::maybe_infinite_iter,
    clippy::mut_mut,
    clippy::needless_continue,
    clippy::needless_pass_by_value,
    clippy::map_unwrap_or,
    clippy::redundant_closure_for_method_calls,
    clippy::same_functions_in_if_condition,
    clippy::shadow_unrelated,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::too_many_lines,
    clippy::type_repetition_in_bounds,
    clippy::unicode_not_nfc,
    clippy::unseparated_literal_suffix,
    clippy::unused_self,
    clippy::used_underscore_binding
)]

//! Ownership and scoped-binding management for raw OpenGL object names.
//!
//! GL hands out objects as bare `GLuint` names with manual
//! generate/delete pairs, a global bind-to-use state machine, and an
//! error side channel that has to be polled after every call. This crate
//! pins all three down: a [`Resource`] owns exactly one name and deletes
//! it exactly once, [`bind`](Resource::bind) returns a guard that rebinds
//! 0 when its scope ends, and every GL call the crate makes runs through
//! [`check_gl!`] so a pending error is reported with its call site before
//! the next call can smear it.
//!
//! Everything here assumes the thread owning the current context; GL
//! state is thread-affine and nothing in this crate is safe to share
//! across threads.
//!
//! ```no_run
//! use glid::kind::{Buffer, Framebuffer, FramebufferTarget};
//! use glid::Resource;
//!
//! let mut vbo = Resource::<Buffer>::new();
//! vbo.make(());
//! {
//!     let _bound = vbo.bind();
//!     // upload vertex data while bound
//! } // GL_ARRAY_BUFFER reverts to 0 here
//!
//! let mut fbo = Resource::<Framebuffer>::new();
//! fbo.make(());
//! {
//!     let _draw = fbo.bind_to(FramebufferTarget::Draw);
//! } // the draw binding point, specifically, reverts to 0
//! ```

pub mod error;
pub mod handle;
pub mod kind;
pub mod resource;

pub use error::{set_error_sink, GlError, GlFailure};
pub use handle::Handle;
pub use resource::{Bind, Binding, Resource, ResourceKind, TargetBinding, TargetedBind};
