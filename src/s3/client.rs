// Implements the S3 Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    Context,
    Result,
};
use aws_config::SdkConfig;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::config::Region as SdkRegion;
use aws_sdk_s3::primitives::DateTime as SdkDateTime;
use aws_sdk_s3::Client as S3Client;
use chrono::{
    DateTime,
    TimeZone,
    Utc,
};
use crate::common::{
    Bucket,
    Buckets,
    ClientConfig,
    ObjectListing,
    ObjectSummary,
    Region,
};
use tracing::debug;

/// The S3 `Client`.
pub struct Client {
    /// The AWS `S3Client`.
    pub client: S3Client,

    /// The shared AWS configuration, used to build clients for buckets in
    /// other regions.
    pub config: SdkConfig,

    /// Substring a bucket name must contain to be reported on.
    pub include: String,

    /// Substring that excludes a bucket from the report.
    pub exclude: String,

    /// `Region` that the client was created in.
    pub region: Region,
}

impl Client {
    /// Return a new S3 `Client` with the given `ClientConfig`.
    pub async fn new(config: ClientConfig) -> Self {
        let region = config.region;

        debug!(
            "new: Creating S3Client in region '{}'",
            region.name(),
        );

        let sdk_config = aws_config::from_env()
            .region(region.clone())
            .load()
            .await;

        let client = S3Client::new(&sdk_config);

        Client {
            client:  client,
            config:  sdk_config,
            include: config.include,
            exclude: config.exclude,
            region:  region,
        }
    }

    /// Returns the buckets in the account, with their creation dates.
    pub async fn list_buckets(&self) -> Result<Buckets> {
        let output = self.client.list_buckets().send().await?;

        let buckets = match output.buckets() {
            Some(buckets) => {
                buckets.iter()
                    .filter_map(|bucket| {
                        let name = bucket.name()?.to_owned();

                        let creation_date = bucket.creation_date()
                            .map(to_chrono)
                            .unwrap_or(DateTime::UNIX_EPOCH);

                        Some(Bucket {
                            name:          name,
                            creation_date: creation_date,
                        })
                    })
                    .collect()
            },
            None => Vec::new(),
        };

        Ok(buckets)
    }

    /// Return the bucket location (region name) for the given `bucket`.
    ///
    /// This method will properly handle the case of the `null` (empty) and
    /// `EU` location constraints, by replacing them with `us-east-1` and
    /// `eu-west-1` respectively.
    pub async fn get_bucket_location(&self, bucket: &str) -> Result<String> {
        debug!("get_bucket_location for '{}'", bucket);

        let output = self.client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await?;

        let location = output.location_constraint()
            .map(|constraint| constraint.as_str().to_owned())
            .unwrap_or_default();

        debug!("GetBucketLocation API returned '{}'", location);

        // Location constraints for sufficiently old buckets in S3 may not
        // quite meet expectations. These returns are badly documented and the
        // assumptions here are based on what the web console does.
        let location = match location.as_str() {
            ""   => "us-east-1".to_string(),
            "EU" => "eu-west-1".to_string(),
            _    => location,
        };

        Ok(location)
    }

    /// Retrieve every object in `bucket`.
    ///
    /// A failed page fetch aborts the listing permanently for this run; the
    /// objects retrieved up to that point are returned alongside the error.
    pub async fn list_bucket_objects(&self, bucket: &str) -> ObjectListing {
        let mut objects = Vec::new();

        let error = match self.list_objects_into(bucket, &mut objects).await {
            Ok(())   => None,
            Err(err) => Some(format!("{:#}", err)),
        };

        ObjectListing {
            objects: objects,
            error:   error,
        }
    }

    // Return a client in the bucket's own region, since ListObjects only
    // works against the region a bucket lives in.
    async fn bucket_client(&self, bucket: &str) -> Result<S3Client> {
        let location = self.get_bucket_location(bucket).await?;

        if location == self.region.name() {
            return Ok(self.client.clone());
        }

        debug!("bucket_client: building client in '{}' for '{}'", location, bucket);

        let config = S3ConfigBuilder::from(&self.config)
            .region(SdkRegion::new(location))
            .build();

        Ok(S3Client::from_conf(config))
    }

    // Loop over ListObjectsV2 pages until the listing is complete, pushing
    // each object into `objects` as it arrives so that callers keep the
    // partial listing when a page fetch fails.
    async fn list_objects_into(
        &self,
        bucket: &str,
        objects: &mut Vec<ObjectSummary>,
    ) -> Result<()> {
        debug!("list_objects_into for '{}'", bucket);

        let client = self.bucket_client(bucket)
            .await
            .with_context(|| format!("resolving region for bucket '{}'", bucket))?;

        let mut continuation_token: Option<String> = None;

        loop {
            let output = client
                .list_objects_v2()
                .bucket(bucket)
                .fetch_owner(true)
                .set_continuation_token(continuation_token.take())
                .send()
                .await
                .with_context(|| format!("listing objects in bucket '{}'", bucket))?;

            if let Some(contents) = output.contents() {
                for object in contents {
                    objects.push(ObjectSummary {
                        key: object.key().unwrap_or_default().to_owned(),

                        last_modified: object.last_modified()
                            .map(to_chrono)
                            .unwrap_or(DateTime::UNIX_EPOCH),

                        size: object.size().max(0) as u64,

                        owner_id: object.owner()
                            .and_then(|owner| owner.id())
                            .map(String::from),
                    });
                }
            }

            // If the output was truncated we should have a continuation
            // token for the next page, otherwise we're done.
            if output.is_truncated() {
                continuation_token = output.next_continuation_token().map(String::from);
            }
            else {
                break;
            }
        }

        Ok(())
    }
}

// S3 timestamps fit comfortably within chrono's range.
fn to_chrono(datetime: &SdkDateTime) -> DateTime<Utc> {
    Utc.timestamp_opt(datetime.secs(), datetime.subsec_nanos())
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::retry::RetryConfig;
    use aws_sdk_s3::config::Config as S3Config;
    use aws_sdk_s3::config::Credentials;
    use aws_smithy_client::erase::DynConnector;
    use aws_smithy_client::test_connection::TestConnection;
    use aws_smithy_http::body::SdkBody;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    enum ResponseType<'a> {
        FromFile(&'a str),
        WithStatus(u16),
    }

    // Create a mock S3 client, returning the canned responses in order.
    fn mock_client(
        responses: Vec<ResponseType<'_>>,
        include:   &str,
        exclude:   &str,
    ) -> Client {
        let events = responses
            .iter()
            .map(|response| {
                match response {
                    ResponseType::FromFile(file) => {
                        let path = Path::new("test-data").join(file);
                        let data = fs::read_to_string(path).unwrap();

                        (
                            http::Request::builder()
                                .body(SdkBody::from("request body"))
                                .unwrap(),

                            http::Response::builder()
                                .status(200)
                                .body(SdkBody::from(data))
                                .unwrap(),
                        )
                    },
                    ResponseType::WithStatus(status) => {
                        (
                            http::Request::builder()
                                .body(SdkBody::from("request body"))
                                .unwrap(),

                            http::Response::builder()
                                .status(*status)
                                .body(SdkBody::from(""))
                                .unwrap(),
                        )
                    },
                }
            })
            .collect();

        let conn = TestConnection::new(events);
        let conn = DynConnector::new(conn);

        let creds = Credentials::from_keys(
            "ATESTCLIENT",
            "atestsecretkey",
            Some("atestsessiontoken".to_string()),
        );

        let conf = S3Config::builder()
            .credentials_provider(creds)
            .http_connector(conn)
            .region(SdkRegion::new("eu-west-1"))
            .retry_config(RetryConfig::disabled())
            .build();

        let client = S3Client::from_conf(conf);

        let config = SdkConfig::builder()
            .region(SdkRegion::new("eu-west-1"))
            .build();

        Client {
            client:  client,
            config:  config,
            include: include.to_string(),
            exclude: exclude.to_string(),
            region:  Region::new().set_region("eu-west-1"),
        }
    }

    #[tokio::test]
    async fn test_list_buckets() {
        let client = mock_client(
            vec![ResponseType::FromFile("s3-list-buckets.xml")],
            "",
            "",
        );

        let mut buckets = client.list_buckets().await.unwrap();
        buckets.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<&str> = buckets.iter()
            .map(|bucket| bucket.name.as_str())
            .collect();

        let expected = vec![
            "a-bucket-name",
            "another-bucket-name",
        ];

        assert_eq!(names, expected);

        let expected_creation = Utc.with_ymd_and_hms(2020, 3, 12, 14, 45, 0).unwrap();

        assert_eq!(buckets[0].creation_date, expected_creation);
    }

    #[tokio::test]
    async fn test_buckets_filtered() {
        use crate::common::BucketLister;

        let client = mock_client(
            vec![ResponseType::FromFile("s3-list-buckets.xml")],
            "another",
            "",
        );

        let buckets = client.buckets().await.unwrap();

        let names: Vec<&str> = buckets.iter()
            .map(|bucket| bucket.name.as_str())
            .collect();

        assert_eq!(names, vec!["another-bucket-name"]);
    }

    #[tokio::test]
    async fn test_get_bucket_location() {
        let tests = vec![
            ("s3-get-bucket-location.xml",      "eu-west-1"),
            ("s3-get-bucket-location-eu.xml",   "eu-west-1"),
            ("s3-get-bucket-location-null.xml", "us-east-1"),
        ];

        for test in tests {
            let data_file = test.0;
            let expected  = test.1;

            let client = mock_client(
                vec![ResponseType::FromFile(data_file)],
                "",
                "",
            );

            let ret = client.get_bucket_location("test-bucket").await.unwrap();

            assert_eq!(ret, expected);
        }
    }

    #[tokio::test]
    async fn test_list_bucket_objects() {
        let responses = vec![
            ResponseType::FromFile("s3-get-bucket-location.xml"),
            ResponseType::FromFile("s3-list-objects.xml"),
        ];

        let client  = mock_client(responses, "", "");
        let listing = client.list_bucket_objects("test-bucket").await;

        assert!(listing.error.is_none());
        assert_eq!(listing.objects.len(), 3);

        let expected = ObjectSummary {
            key:           "logs/one.txt".into(),
            last_modified: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            size:          100,
            owner_id:      Some("owner-a".into()),
        };

        assert_eq!(listing.objects[0], expected);

        // The third object carries no owner metadata.
        assert_eq!(listing.objects[2].owner_id, None);

        let total: u64 = listing.objects.iter().map(|object| object.size).sum();

        assert_eq!(total, 350);
    }

    #[tokio::test]
    async fn test_list_bucket_objects_paginated() {
        let responses = vec![
            ResponseType::FromFile("s3-get-bucket-location.xml"),
            ResponseType::FromFile("s3-list-objects-truncated.xml"),
            ResponseType::FromFile("s3-list-objects.xml"),
        ];

        let client  = mock_client(responses, "", "");
        let listing = client.list_bucket_objects("test-bucket").await;

        assert!(listing.error.is_none());
        assert_eq!(listing.objects.len(), 5);
    }

    #[tokio::test]
    async fn test_list_bucket_objects_partial_failure() {
        let responses = vec![
            ResponseType::FromFile("s3-get-bucket-location.xml"),
            ResponseType::FromFile("s3-list-objects-truncated.xml"),
            ResponseType::WithStatus(500),
        ];

        let client  = mock_client(responses, "", "");
        let listing = client.list_bucket_objects("test-bucket").await;

        // The first page survives the second page's failure.
        assert_eq!(listing.objects.len(), 2);

        let error = listing.error.unwrap();

        assert!(error.contains("listing objects in bucket 'test-bucket'"));
    }

    #[tokio::test]
    async fn test_list_bucket_objects_location_failure() {
        let client  = mock_client(vec![ResponseType::WithStatus(403)], "", "");
        let listing = client.list_bucket_objects("test-bucket").await;

        assert!(listing.objects.is_empty());

        let error = listing.error.unwrap();

        assert!(error.contains("resolving region for bucket 'test-bucket'"));
    }
}
