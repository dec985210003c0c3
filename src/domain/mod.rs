// Domain layer - Views, jobs and the view set
pub mod list_row;
pub mod view;
pub mod view_set;
