mod accept;
mod expire;
mod invite;

pub use accept::AcceptInviteAction;
pub use expire::ExpireStaleAction;
pub use invite::{CreateInviteAction, CreateInviteInput, CreateInviteOutput, InviteConfig};
