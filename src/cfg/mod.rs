//! This module handles configuration, command-line parsing, and logging.

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

/// Command-line interface parsing.
pub mod cli;
/// The nginx-style server config: lexer, parser, AST, and route extraction.
pub mod http_config;
/// Logger initialization.
pub mod logger;
