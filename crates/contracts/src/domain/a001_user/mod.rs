pub mod aggregate;

pub use aggregate::{
    remove_by_id, ApproveProfileChangeDto, ListUsersQuery, ProfileChangeRequest,
    ProfileChangeStatus, UpdateStatusDto, User, UserStatus,
};
