//! Unit tests for the drive loop and inbound triggers.
