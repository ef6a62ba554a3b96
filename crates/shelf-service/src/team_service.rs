//! Team service.

use crate::ResourceService;
use shelf_core::domain::{Team, TeamForm};
use shelf_repository::TeamRepository;

/// Plain CRUD over teams.
pub type TeamService = ResourceService<Team, TeamForm, dyn TeamRepository>;
