//! Unit tests for the GitLab module.
