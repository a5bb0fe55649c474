mod object_artifact_store_test;
