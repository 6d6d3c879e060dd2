//! GraphQL documents sent to the storefront API.

/// Fetches the first four products with pagination cursors. Every product
/// image and variant default image is requested at four responsive widths.
pub const PAGINATE_PRODUCTS_QUERY: &str = r"query paginateProducts {
  site {
    products(first: 4) {
      pageInfo {
        startCursor
        endCursor
      }
      edges {
        cursor
        node {
          entityId
          name
          path
          images {
            edges {
              node {
                ...responsiveImageFragment
              }
            }
          }
          variants {
            edges {
              node {
                entityId
                defaultImage {
                  ...responsiveImageFragment
                }
              }
            }
          }
        }
      }
    }
  }
}

fragment responsiveImageFragment on Image {
  url320wide: url(width: 320)
  url640wide: url(width: 640)
  url960wide: url(width: 960)
  url1280wide: url(width: 1280)
}
";
