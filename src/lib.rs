// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod error;
pub mod labels;
pub mod models;
pub mod schema;
pub mod storage;
pub mod store;
pub mod utils;
