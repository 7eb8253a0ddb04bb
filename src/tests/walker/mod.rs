//! Traversal engine tests.
