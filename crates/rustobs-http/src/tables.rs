//! Response header tables for object operations.
//!
//! Each table maps a response header to the result key it is recorded under.
//! Pass one to [`DecodeStrategy::with_headers`](crate::DecodeStrategy::with_headers)
//! or [`DecodeStrategy::header_only`](crate::DecodeStrategy::header_only).

/// `PUT /{object}`.
pub const PUT_OBJECT: &[(&str, &str)] = &[
    ("x-obs-version-id", "VersionId"),
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-data-encryption", "ServerSideDataEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
    ("x-obs-server-side-encryption-customer-key-MD5", "ServerSideEncryptionCustomerKeyMD5"),
    ("x-obs-storage-class", "StorageClass"),
];

/// `PUT /{object}` with `x-obs-copy-source`.
pub const COPY_OBJECT: &[(&str, &str)] = &[
    ("x-obs-copy-source-version-id", "CopySourceVersionId"),
    ("x-obs-version-id", "VersionId"),
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
    ("x-obs-server-side-encryption-customer-key-MD5", "ServerSideEncryptionCustomerKeyMD5"),
    ("x-obs-storage-class", "StorageClass"),
];

/// `GET /{object}`. The payload stays in the response body.
pub const GET_OBJECT: &[(&str, &str)] = &[
    ("x-obs-expiration", "Expiration"),
    ("x-obs-website-redirect-location", "WebsiteRedirectLocation"),
    ("x-obs-delete-marker", "DeleteMarker"),
    ("x-obs-version-id", "VersionId"),
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-data-encryption", "ServerSideDataEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
    ("x-obs-server-side-encryption-customer-key-MD5", "ServerSideEncryptionCustomerKeyMD5"),
    ("x-obs-object-type", "ObjectType"),
    ("x-obs-next-append-position", "NextAppendPosition"),
    ("x-obs-tagging-count", "TaggingCount"),
    ("ETag", "ETag"),
];

/// `HEAD /{object}`.
pub const HEAD_OBJECT: &[(&str, &str)] = &[
    ("x-obs-expiration", "Expiration"),
    ("x-obs-website-redirect-location", "WebsiteRedirectLocation"),
    ("x-obs-version-id", "VersionId"),
    ("Access-Control-Allow-Origin", "AccessControlAllowOrigin"),
    ("Access-Control-Allow-Headers", "AccessControlAllowHeaders"),
    ("Access-Control-Max-Age", "AccessControlMaxAge"),
    ("Access-Control-Allow-Methods", "AccessControlAllowMethods"),
    ("Access-Control-Expose-Headers", "AccessControlExposeHeaders"),
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-data-encryption", "ServerSideDataEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
    ("x-obs-server-side-encryption-customer-key-MD5", "ServerSideEncryptionCustomerKeyMD5"),
    ("x-obs-storage-class", "StorageClass"),
];

/// `DELETE /{object}`.
pub const DELETE_OBJECT: &[(&str, &str)] = &[
    ("x-obs-delete-marker", "DeleteMarker"),
    ("x-obs-version-id", "VersionId"),
];

/// `POST /{object}?append&position=N`.
pub const APPEND_OBJECT: &[(&str, &str)] = &[
    ("x-obs-version-id", "VersionId"),
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-data-encryption", "ServerSideDataEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
    ("x-obs-server-side-encryption-customer-key-MD5", "ServerSideEncryptionCustomerKeyMD5"),
    ("x-obs-next-append-position", "NextAppendPosition"),
];

/// `PUT /{object}?acl` and `GET /{object}?acl`.
pub const OBJECT_ACL: &[(&str, &str)] = &[("x-obs-version-id", "VersionId")];

/// `PUT /{object}?metadata`.
pub const SET_OBJECT_METADATA: &[(&str, &str)] = &[
    ("x-obs-metadata-directive", "MetadataDirective"),
    ("Cache-Control", "CacheControl"),
    ("Content-Disposition", "ContentDisposition"),
    ("Content-Encoding", "ContentEncoding"),
    ("Content-Language", "ContentLanguage"),
    ("Expires", "Expires"),
    ("x-obs-website-redirect-location", "WebsiteRedirectLocation"),
    ("x-obs-storage-class", "StorageClass"),
    ("x-obs-expires", "x-obs-expires"),
];

/// `POST /{object}?uploads`.
pub const INITIATE_MULTIPART: &[(&str, &str)] = &[
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
    ("x-obs-server-side-encryption-customer-key-MD5", "ServerSideEncryptionCustomerKeyMD5"),
];

/// `PUT /{object}?partNumber=N&uploadId=ID`.
pub const UPLOAD_PART: &[(&str, &str)] = INITIATE_MULTIPART;

/// `POST /{object}?uploadId=ID`.
pub const COMPLETE_MULTIPART: &[(&str, &str)] = &[
    ("x-obs-version-id", "VersionId"),
    ("x-obs-server-side-encryption", "ServerSideEncryption"),
    ("x-obs-server-side-encryption-kms-key-id", "ServerSideEncryptionKmsKeyId"),
    ("x-obs-server-side-encryption-customer-algorithm", "ServerSideEncryptionCustomerAlgorithm"),
];
