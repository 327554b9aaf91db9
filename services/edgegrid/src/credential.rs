// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use edgesign_core::{utils::Redact, Error, Result};

use crate::Config;

/// Credential for EdgeGrid.
///
/// All three fields are guaranteed to be non-empty.
#[derive(Clone)]
pub struct Credential {
    /// Client token of the API client.
    pub client_token: String,
    /// Access token of the API client.
    pub access_token: String,
    /// Client secret, only ever used as HMAC key.
    pub client_secret: String,
}

impl Credential {
    /// Create a new credential, all fields must be non-empty.
    pub fn new(
        client_token: impl Into<String>,
        access_token: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let cred = Self {
            client_token: client_token.into(),
            access_token: access_token.into(),
            client_secret: client_secret.into(),
        };

        for (name, value) in [
            ("client_token", &cred.client_token),
            ("access_token", &cred.access_token),
            ("client_secret", &cred.client_secret),
        ] {
            if value.is_empty() {
                return Err(Error::config_invalid(format!("{name} is not set")));
            }
        }

        Ok(cred)
    }

    /// Take the credential out of a config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.client_token.clone().unwrap_or_default(),
            cfg.access_token.clone().unwrap_or_default(),
            cfg.client_secret.clone().unwrap_or_default(),
        )
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_token", &Redact::from(&self.client_token))
            .field("access_token", &Redact::from(&self.access_token))
            .field("client_secret", &Redact::from(&self.client_secret))
            .finish()
    }
}
