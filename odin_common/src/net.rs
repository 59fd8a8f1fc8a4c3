/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! common utility functions for network operations

use reqwest::{header::{HeaderMap,HeaderValue,CONTENT_TYPE}, Client, StatusCode};
use serde::{de::DeserializeOwned,Serialize};

crate::define_error!{ pub OdinNetError =
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, OdinNetError>;

/// POST `data` as JSON to `url` and deserialize the JSON response
pub async fn post_json_query<T,U> (client: &Client, url: &str, data: T) -> Result<U> where T: Serialize, U: DeserializeOwned {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let req = client.post( url)
        .headers( headers)
        .json( &data);

    let response = req.send().await?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.json().await? )
        }
        StatusCode::NOT_FOUND => {
            Err( OdinNetError::NotFoundError(url.to_string()))
        }
        other => {
            Err( OdinNetError::OpFailed(format!("response status {other:?}")))
        }
    }
}
