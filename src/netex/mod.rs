// Copyright (C) 2025 Hove and/or its affiliates.
//
// This program is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, version 3.

// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.

// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>

//! Reader of the on-demand ("ODV") profile of NeTEx.
//!
//! Objects are looked up by element name anywhere in the document, the
//! frame layout of the producer is not relied upon.

mod calendars;
mod journeys;
mod lines;
mod read;
mod stops;

pub use read::read;
pub(crate) use read::read_collections;
